use dioxus::prelude::*;
use line_highlight_engine::interaction::CLEAR_GLYPH;
use line_highlight_engine::style::{CLEAR_CLASS, PALETTE_CLASS, PALETTE_DOT_CLASS};
use line_highlight_engine::{Palette, PaletteChoice};

/// Floating swatch row next to the clicked gutter cell.
#[component]
pub fn PaletteMenu(palette: Palette, on_choice: EventHandler<PaletteChoice>) -> Element {
    rsx! {
        div {
            class: PALETTE_CLASS,
            style: "left: {palette.left}px; top: {palette.top}px;",
            for choice in palette.entries.iter().copied() {
                if let Some(color) = choice.color() {
                    span {
                        class: PALETTE_DOT_CLASS,
                        "data-color": "{color}",
                        title: choice.title(),
                        onclick: move |evt| {
                            evt.stop_propagation();
                            on_choice.call(choice);
                        },
                    }
                } else {
                    span {
                        class: "{PALETTE_DOT_CLASS} {CLEAR_CLASS}",
                        title: choice.title(),
                        onclick: move |evt| {
                            evt.stop_propagation();
                            on_choice.call(choice);
                        },
                        "{CLEAR_GLYPH}"
                    }
                }
            }
        }
    }
}
