//! Stylesheet for highlighted lines, the palette and the gutter.
//!
//! Generated once from the palette. Hosts mount it with the view that uses
//! it so it goes away with that view.

use std::sync::LazyLock;

use crate::grammar::PALETTE;
use crate::interaction::surface::{
    GUTTER_ELEMENT_CLASS, LINE_NUMBERS_CLASS, LIVE_VIEW_CLASS, READING_VIEW_CLASS,
};
use crate::render::dual_view::{BLOCK_CONTAINER_CLASS, INLINE_CONTAINER_CLASS};

pub const PALETTE_CLASS: &str = "hl-palette";
pub const PALETTE_DOT_CLASS: &str = "hl-palette-dot";
pub const CLEAR_CLASS: &str = "clear";

const STATIC_RULES: &str = r#"
.hl-block {
  border-radius: 0.25em;
  margin-left: 0em;
  transition: background 0.2s;
}
.hl-inline-marker {
  display: inline-block;
  border-radius: 0.5em;
  font-size: 0.95em;
  padding: 0.08em 0.40em;
  margin: 0 0.1em;
  font-family: inherit !important;
  font-weight: 400;
  letter-spacing: 0.03em;
  vertical-align: baseline;
  box-shadow: 0 0 0 1px #ddd;
  user-select: none;
  transition: background 0.2s, color 0.2s;
}
.hl-palette {
  position: fixed;
  display: flex;
  align-items: center;
  gap: 0.2em;
  padding: 0.25em 0.5em;
  background: #fff;
  border: 1px solid #ddd;
  border-radius: 1.5em;
  box-shadow: 0 2px 12px 0 rgba(60,60,60,0.10);
  z-index: 9999;
  min-width: 0;
}
.hl-palette-dot {
  width: 1.2em;
  height: 1.2em;
  border-radius: 50%;
  border: 2px solid #fff;
  box-shadow: 0 0 0 2px #bbb;
  cursor: pointer;
  margin: 0 0.1em;
  display: inline-block;
  transition: transform 0.12s, box-shadow 0.12s;
}
.hl-palette-dot:hover {
  transform: scale(1.22);
  box-shadow: 0 0 0 3px #2196f3;
}
.hl-palette-dot.clear {
  background: #fff !important;
  color: #2196f3;
  font-size: 1.25em;
  border: 1.5px solid #bbb;
  display: flex;
  align-items: center;
  justify-content: center;
  width: 1.3em;
  height: 1.3em;
  font-weight: bold;
  box-shadow: none;
}
"#;

fn build_stylesheet() -> String {
    let mut css = String::new();

    // Exactly one fragment of each highlighted line is visible per view.
    for (view, block, inline) in [
        (READING_VIEW_CLASS, "block", "none"),
        (LIVE_VIEW_CLASS, "none", "block"),
    ] {
        css.push_str(&format!(
            ".{view} .{BLOCK_CONTAINER_CLASS} {{ display:{block}; }}\n"
        ));
        css.push_str(&format!(
            ".{view} .{INLINE_CONTAINER_CLASS} {{ display:{inline}; }}\n"
        ));
    }

    css.push_str(STATIC_RULES);

    for spec in PALETTE.iter() {
        css.push_str(&format!(
            ".{PALETTE_DOT_CLASS}[data-color=\"{}\"] {{ background: {}; }}\n",
            spec.name,
            spec.swatch.hex()
        ));
    }

    css.push_str(&format!(
        ".{LINE_NUMBERS_CLASS} .{GUTTER_ELEMENT_CLASS} {{\n  cursor: pointer !important;\n  color: #2196f3 !important;\n  font-weight: bold !important;\n  background: #e5f0fd !important;\n  border-radius: 1em !important;\n  transition: background 0.12s;\n}}\n"
    ));
    css.push_str(&format!(
        ".{LINE_NUMBERS_CLASS} .{GUTTER_ELEMENT_CLASS}:hover {{\n  filter: brightness(0.95);\n  background: #dbeafe !important;\n}}\n"
    ));
    css
}

static STYLESHEET: LazyLock<String> = LazyLock::new(build_stylesheet);

/// The complete stylesheet.
pub fn stylesheet() -> &'static str {
    &STYLESHEET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_show_opposite_fragments() {
        let css = stylesheet();
        assert!(css.contains(".hl-reading-view .hl-block-container { display:block; }"));
        assert!(css.contains(".hl-reading-view .hl-inline-container { display:none; }"));
        assert!(css.contains(".hl-live-view .hl-block-container { display:none; }"));
        assert!(css.contains(".hl-live-view .hl-inline-container { display:block; }"));
    }

    #[test]
    fn every_colour_has_a_swatch_rule() {
        let css = stylesheet();
        for spec in PALETTE.iter() {
            assert!(css.contains(&format!("[data-color=\"{}\"]", spec.name)));
        }
        assert!(css.contains("background: #AA00FF;"));
    }

    #[test]
    fn generated_rules_end_in_newlines() {
        let css = stylesheet();
        assert!(css.contains(
            ".hl-reading-view .hl-inline-container { display:none; }\n.hl-live-view"
        ));
        assert!(css.contains("transition: background 0.12s;\n}\n"));
        assert!(css.ends_with("background: #dbeafe !important;\n}\n"));
    }

    #[test]
    fn stylesheet_is_built_once() {
        assert!(std::ptr::eq(stylesheet(), stylesheet()));
    }
}
