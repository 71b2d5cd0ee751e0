use dioxus::prelude::*;
use line_highlight_engine::interaction::surface::READING_VIEW_CLASS;
use line_highlight_engine::{render_document_html, render_reading_view};

/// Rendered markdown; highlighted lines show their block fragment.
#[component]
pub fn ReadingView(source: String) -> Element {
    let html = render_document_html(&render_reading_view(&source));

    rsx! {
        div {
            class: READING_VIEW_CLASS,
            dangerous_inner_html: "{html}",
        }
    }
}
