use std::time::{Duration, Instant};

use dioxus::prelude::*;
use line_highlight_engine::interaction::surface::{
    ElementInfo, GUTTER_ELEMENT_CLASS, LINE_NUMBERS_CLASS, LIVE_VIEW_CLASS,
};
use line_highlight_engine::interaction::{ClickEvent, MarkerRequest, Rect};
use line_highlight_engine::render_live_lines;
use line_highlight_engine::{DocumentRef, InteractionController, Palette, PaletteChoice};

use super::PaletteMenu;

/// Gutter cell size in CSS pixels, kept in step with `app.css`.
const GUTTER_CELL_WIDTH: f64 = 40.0;
const LINE_HEIGHT: f64 = 24.0;

/// The interaction controller and the note its palette belongs to.
#[derive(Debug)]
struct NotePalette {
    document: DocumentRef,
    controller: InteractionController,
}

impl NotePalette {
    fn new(document: DocumentRef, grace: Duration) -> Self {
        Self {
            document,
            controller: InteractionController::new(grace),
        }
    }

    /// Controller for `document`. Moving to another note closes a palette
    /// left open on the previous one.
    fn controller_for(&mut self, document: &DocumentRef) -> &mut InteractionController {
        if self.document != *document {
            log::debug!("Note changed to {}, closing palette", document.relative_path());
            self.controller.dismiss();
            self.document = document.clone();
        }
        &mut self.controller
    }

    fn palette_for(&self, document: &DocumentRef) -> Option<&Palette> {
        if self.document == *document {
            self.controller.palette()
        } else {
            None
        }
    }
}

/// Source lines next to a clickable line-number gutter.
///
/// Owns the interaction controller, so clicks are only observed while this
/// view is mounted and an open palette goes away with it. A palette is tied
/// to the note it was opened on.
#[component]
pub fn LiveView(
    document: DocumentRef,
    source: String,
    grace: Duration,
    on_marker_request: EventHandler<MarkerRequest>,
) -> Element {
    let mut notes = use_signal({
        let document = document.clone();
        move || NotePalette::new(document, grace)
    });
    let lines = render_live_lines(&source);
    let open_palette = notes.read().palette_for(&document).cloned();

    rsx! {
        div {
            class: LIVE_VIEW_CLASS,
            onclick: {
                let document = document.clone();
                move |_| {
                    let event = ClickEvent::primary(
                        vec![ElementInfo::new(&[LIVE_VIEW_CLASS])],
                        Instant::now(),
                    );
                    notes.write().controller_for(&document).handle_click(&event);
                }
            },
            div {
                class: "hl-live-body",
                div {
                    class: LINE_NUMBERS_CLASS,
                    for number in 1..=lines.len() {
                        div {
                            key: "{number}",
                            class: GUTTER_ELEMENT_CLASS,
                            onclick: {
                                let document = document.clone();
                                move |evt: MouseEvent| {
                                    evt.stop_propagation();
                                    let client = evt.client_coordinates();
                                    let offset = evt.element_coordinates();
                                    let left = client.x - offset.x;
                                    let top = client.y - offset.y;
                                    let event = ClickEvent::on_live_gutter(
                                        number,
                                        Rect::new(left, top, left + GUTTER_CELL_WIDTH, top + LINE_HEIGHT),
                                        Instant::now(),
                                    );
                                    notes.write().controller_for(&document).handle_click(&event);
                                }
                            },
                            "{number}"
                        }
                    }
                }
                div {
                    class: "hl-live-lines",
                    for (index, line) in lines.iter().enumerate() {
                        div {
                            key: "{index}",
                            class: "hl-live-line",
                            dangerous_inner_html: line.to_html(),
                        }
                    }
                }
            }
            if let Some(palette) = open_palette {
                PaletteMenu {
                    palette,
                    on_choice: {
                        let document = document.clone();
                        move |choice: PaletteChoice| {
                            let request = notes.write().controller_for(&document).select(choice);
                            if let Some(request) = request {
                                on_marker_request.call(request);
                            }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use line_highlight_engine::ColorTag;

    fn three_lines() -> Element {
        rsx! {
            LiveView {
                document: DocumentRef::from("journal/today.md"),
                source: "first\nsecond %hl-red%\n".to_string(),
                grace: Duration::from_millis(20),
                on_marker_request: |_: MarkerRequest| {},
            }
        }
    }

    #[test]
    fn test_gutter_has_a_cell_per_source_line() {
        let mut dom = VirtualDom::new(three_lines);
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("class=\"hl-live-view\""));
        assert!(html.contains("class=\"hl-line-numbers\""));
        assert_eq!(html.matches("class=\"hl-gutter-element\"").count(), 3);
        assert!(html.contains(">3</div>"));
        assert!(html.contains("hl-inline-marker"));
        assert!(!html.contains("hl-palette"));
    }

    fn open_on_line(notes: &mut NotePalette, document: &DocumentRef, line_number: usize) {
        let event = ClickEvent::on_live_gutter(
            line_number,
            Rect::new(0.0, 0.0, GUTTER_CELL_WIDTH, LINE_HEIGHT),
            Instant::now(),
        );
        notes.controller_for(document).handle_click(&event);
    }

    #[test]
    fn test_switching_notes_closes_the_palette() {
        let first = DocumentRef::from("a.md");
        let second = DocumentRef::from("b.md");
        let mut notes = NotePalette::new(first.clone(), Duration::from_millis(20));

        open_on_line(&mut notes, &first, 4);
        assert_eq!(notes.palette_for(&first).map(|p| p.line_index), Some(3));
        assert!(notes.palette_for(&second).is_none());

        let request = notes
            .controller_for(&second)
            .select(PaletteChoice::Color(ColorTag::Purple));
        assert_eq!(request, None);
        assert!(notes.palette_for(&first).is_none());
    }

    #[test]
    fn test_palette_on_current_note_still_selects() {
        let note = DocumentRef::from("a.md");
        let mut notes = NotePalette::new(note.clone(), Duration::from_millis(20));

        open_on_line(&mut notes, &note, 2);
        let request = notes
            .controller_for(&note)
            .select(PaletteChoice::Color(ColorTag::Purple));

        assert_eq!(
            request,
            Some(MarkerRequest {
                line_index: 1,
                color: Some(ColorTag::Purple),
            })
        );
    }
}
