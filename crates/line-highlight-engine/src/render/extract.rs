use std::ops::Range;

use crate::grammar::{ColorTag, MARKER_AT_LINE_END};

use super::segment::LogicalLine;

/// A trailing marker found in a line's text. Offsets are byte offsets into
/// the text that was scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    pub color: ColorTag,
    /// The `%hl-...%` token itself.
    pub token: Range<usize>,
    /// Start of the whitespace run directly before the token (equal to
    /// `token.start` when there is none).
    pub strip_start: usize,
}

impl MarkerMatch {
    /// The scanned text with the token, the whitespace before it and the
    /// whitespace after it removed.
    pub fn stripped<'a>(&self, text: &'a str) -> &'a str {
        &text[..self.strip_start]
    }
}

/// Looks for a marker token at the end of `text`, trailing whitespace allowed.
///
/// A token followed by anything other than whitespace is ordinary prose and
/// does not match.
pub fn extract_marker_from_text(text: &str) -> Option<MarkerMatch> {
    let caps = MARKER_AT_LINE_END.captures(text)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?;
    let color = name.as_str().parse::<ColorTag>().ok()?;

    let token = whole.start()..name.end() + crate::grammar::MARKER_SUFFIX.len();
    let strip_start = text[..token.start].trim_end().len();

    Some(MarkerMatch {
        color,
        token,
        strip_start,
    })
}

/// Looks for a trailing marker in the flattened text of a rendered line.
/// The line itself is not modified.
pub fn extract_marker(line: &LogicalLine) -> Option<MarkerMatch> {
    extract_marker_from_text(&line.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Element, Node};
    use rstest::rstest;

    #[test]
    fn finds_trailing_marker() {
        let text = "Remember this! %hl-yellow%";
        let m = extract_marker_from_text(text).unwrap();

        assert_eq!(m.color, ColorTag::Yellow);
        assert_eq!(&text[m.token.clone()], "%hl-yellow%");
        assert_eq!(m.stripped(text), "Remember this!");
    }

    #[rstest]
    #[case("Text  %hl-red%")]
    #[case("Text\t%hl-red%")]
    #[case("Text %hl-red%   ")]
    #[case("Text %HL-Red%")]
    #[case("Text%hl-red%")]
    fn strips_token_and_surrounding_whitespace(#[case] text: &str) {
        let m = extract_marker_from_text(text).unwrap();
        assert_eq!(m.color, ColorTag::Red);
        assert_eq!(m.stripped(text), "Text");
    }

    #[test]
    fn preceding_content_is_untouched() {
        let text = "  indented *with* stuff   %hl-red%";
        let m = extract_marker_from_text(text).unwrap();
        assert_eq!(m.stripped(text), "  indented *with* stuff");
    }

    #[rstest]
    #[case("see %hl-blue% for details")]
    #[case("%hl-blue%.")]
    #[case("plain text")]
    #[case("%hl-orange%")]
    #[case("")]
    fn non_trailing_or_unknown_markers_do_not_match(#[case] text: &str) {
        assert_eq!(extract_marker_from_text(text), None);
    }

    #[test]
    fn only_the_rightmost_marker_counts() {
        let text = "a %hl-red% b %hl-green%";
        let m = extract_marker_from_text(text).unwrap();
        assert_eq!(m.color, ColorTag::Green);
        assert_eq!(m.stripped(text), "a %hl-red% b");
    }

    #[test]
    fn marker_only_line() {
        let text = "%hl-gray%";
        let m = extract_marker_from_text(text).unwrap();
        assert_eq!(m.token, 0..9);
        assert_eq!(m.stripped(text), "");
    }

    #[test]
    fn flattens_nested_elements() {
        let line = LogicalLine::new(vec![
            Node::text("Some "),
            Node::Element(Element::new("strong").with_child(Node::text("bold"))),
            Node::text(" words %hl-pink%"),
        ]);
        let m = extract_marker(&line).unwrap();
        assert_eq!(m.color, ColorTag::Pink);
        assert_eq!(m.strip_start, "Some bold words".len());
    }
}
