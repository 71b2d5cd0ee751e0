use dioxus::prelude::*;

/// Shown in place of the app when the notes directory can't be read.
#[component]
pub fn ErrorScreen(title: String, message: String, details: Option<String>) -> Element {
    rsx! {
        div {
            class: "error-screen",
            h1 { "{title}" }
            p { "{message}" }
            if let Some(ref detail_text) = details {
                pre { "{detail_text}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    #[test]
    fn test_error_screen_renders_details_only_when_given() {
        let mut dom = VirtualDom::new_with_props(
            ErrorScreen,
            ErrorScreenProps {
                title: "Cannot read notes".to_string(),
                message: "/missing".to_string(),
                details: None,
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("Cannot read notes"));
        assert!(html.contains("/missing"));
        assert!(!html.contains("<pre"));

        let mut dom = VirtualDom::new_with_props(
            ErrorScreen,
            ErrorScreenProps {
                title: "Cannot read notes".to_string(),
                message: "/missing".to_string(),
                details: Some("Permission denied".to_string()),
            },
        );
        dom.rebuild_in_place();

        assert!(render(&dom).contains("<pre>Permission denied</pre>"));
    }
}
