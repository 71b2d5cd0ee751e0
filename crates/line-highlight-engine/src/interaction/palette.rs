use crate::grammar::ColorTag;

/// Glyph shown on the clear control.
pub const CLEAR_GLYPH: &str = "\u{2212}";
pub const CLEAR_TITLE: &str = "Clear highlight";

/// Horizontal gap between the gutter cell and the palette.
pub const PALETTE_OFFSET_X: f64 = 8.0;
/// How far above the gutter cell's top edge the palette sits.
pub const PALETTE_OFFSET_Y: f64 = 2.0;

/// What the user picked in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteChoice {
    Color(ColorTag),
    Clear,
}

impl PaletteChoice {
    /// The colour to write, `None` for clear.
    pub fn color(self) -> Option<ColorTag> {
        match self {
            PaletteChoice::Color(color) => Some(color),
            PaletteChoice::Clear => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PaletteChoice::Color(color) => color.name(),
            PaletteChoice::Clear => CLEAR_TITLE,
        }
    }
}

/// Palette entries in display order: every colour, then clear.
pub fn palette_entries() -> Vec<PaletteChoice> {
    ColorTag::ALL
        .iter()
        .copied()
        .map(PaletteChoice::Color)
        .chain(std::iter::once(PaletteChoice::Clear))
        .collect()
}

/// An open palette for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Zero-based line the palette edits.
    pub line_index: isize,
    pub left: f64,
    pub top: f64,
    pub entries: Vec<PaletteChoice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_colours_then_clear() {
        let entries = palette_entries();

        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0], PaletteChoice::Color(ColorTag::Yellow));
        assert_eq!(entries[6], PaletteChoice::Color(ColorTag::Gray));
        assert_eq!(entries[7], PaletteChoice::Clear);
        assert_eq!(entries[7].title(), "Clear highlight");
        assert_eq!(entries[5].title(), "purple");
    }
}
