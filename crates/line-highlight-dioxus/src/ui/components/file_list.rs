use dioxus::prelude::*;
use line_highlight_engine::DocumentRef;

#[component]
pub fn FileList(
    documents: Vec<DocumentRef>,
    selected: Option<DocumentRef>,
    on_select: EventHandler<DocumentRef>,
) -> Element {
    rsx! {
        div {
            class: "file-list",
            if documents.is_empty() {
                p { class: "empty", "No markdown notes found" }
            }
            for document in documents {
                div {
                    key: "{document.relative_path()}",
                    class: if selected.as_ref() == Some(&document) { "file-item selected" } else { "file-item" },
                    title: "{document.relative_path()}",
                    onclick: {
                        let document = document.clone();
                        move |_| on_select.call(document.clone())
                    },
                    "{document.display_path()}"
                }
            }
        }
    }
}
