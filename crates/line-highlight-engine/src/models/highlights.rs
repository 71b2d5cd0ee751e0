use crate::grammar::ColorTag;
use crate::render::extract_marker_from_text;

/// A source line carrying a highlight marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    /// Zero-based line index.
    pub line: usize,
    pub color: ColorTag,
    /// Line text with the marker stripped.
    pub text: String,
}

/// Every marked line of a document, in order.
pub fn scan_highlights(text: &str) -> Vec<LineHighlight> {
    text.split('\n')
        .enumerate()
        .filter_map(|(line, raw)| {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            extract_marker_from_text(raw).map(|found| LineHighlight {
                line,
                color: found.color,
                text: found.stripped(raw).to_string(),
            })
        })
        .collect()
}

/// Number of marked lines per palette colour, in palette order.
pub fn count_by_color(highlights: &[LineHighlight]) -> Vec<(ColorTag, usize)> {
    ColorTag::ALL
        .iter()
        .map(|&color| {
            let count = highlights.iter().filter(|h| h.color == color).count();
            (color, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect()
}
