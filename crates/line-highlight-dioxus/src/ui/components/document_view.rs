use std::time::Duration;

use dioxus::prelude::*;
use line_highlight_config::DefaultView;
use line_highlight_engine::interaction::MarkerRequest;
use line_highlight_engine::models::count_by_color;
use line_highlight_engine::style::stylesheet;
use line_highlight_engine::{DocumentRef, scan_highlights};

use super::{LiveView, ReadingView};

/// Main panel for the open note. Mounts the highlight stylesheet, so it is
/// only present while a note is shown.
#[component]
pub fn DocumentView(
    document: DocumentRef,
    source: String,
    view: DefaultView,
    grace: Duration,
    on_view_change: EventHandler<DefaultView>,
    on_marker_request: EventHandler<MarkerRequest>,
) -> Element {
    let counts = count_by_color(&scan_highlights(&source));
    let display_name = document.display_path();

    rsx! {
        style { {stylesheet()} }
        div {
            class: "document-container",
            div {
                class: "document-header",
                h1 { "{display_name}" }
                div {
                    class: "view-toggle",
                    button {
                        class: if view == DefaultView::Reading { "active" } else { "" },
                        onclick: move |_| on_view_change.call(DefaultView::Reading),
                        "Reading"
                    }
                    button {
                        class: if view == DefaultView::Live { "active" } else { "" },
                        onclick: move |_| on_view_change.call(DefaultView::Live),
                        "Live"
                    }
                }
            }
            if !counts.is_empty() {
                ul {
                    class: "highlight-summary",
                    for (color, count) in counts {
                        li {
                            key: "{color}",
                            span {
                                class: "swatch",
                                style: "background: {color.swatch().hex()};",
                            }
                            "{color} {count}"
                        }
                    }
                }
            }
            hr {}
            if view == DefaultView::Reading {
                ReadingView { source: source.clone() }
            } else {
                LiveView {
                    key: "{document.relative_path()}",
                    document: document.clone(),
                    source: source.clone(),
                    grace,
                    on_marker_request,
                }
            }
        }
    }
}
