use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::grammar::{ColorTag, marker_token};
use crate::host::{ActiveDocument, DocumentStore};
use crate::io::IoError;
use crate::render::extract_marker_from_text;

use super::lines::text_lines;

/// What [`set_line_marker`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The document was rewritten.
    Applied,
    /// The line already looked like that; nothing was written.
    Unchanged,
    NoActiveDocument,
    LineOutOfRange,
}

/// New content for one line: existing trailing marker removed, then the new
/// marker appended after a single space.
fn remark_line(line: &str, color: Option<ColorTag>) -> String {
    let (content, cr) = match line.strip_suffix('\r') {
        Some(content) => (content, "\r"),
        None => (line, ""),
    };

    let base = match extract_marker_from_text(content) {
        Some(found) => found.stripped(content),
        None if color.is_some() => content.trim_end(),
        None => content,
    };

    match color {
        Some(color) => format!("{base} {}{cr}", marker_token(color)),
        None => format!("{base}{cr}"),
    }
}

/// Rewrites the marker of line `line_index` (zero-based) in `text`.
///
/// Returns `None` when the index is out of range. Every byte outside the
/// target line's trailing region is preserved.
pub fn rewrite_line_marker(
    text: &str,
    line_index: isize,
    color: Option<ColorTag>,
) -> Option<String> {
    let index = usize::try_from(line_index).ok()?;
    let rope = Rope::from(text);
    let line = text_lines(&rope).into_iter().nth(index)?;

    let replacement = remark_line(&line.text, color);
    if replacement == line.text {
        return Some(text.to_string());
    }

    let mut builder = Builder::new(rope.len());
    builder.replace(line.span.start..line.span.end, Rope::from(replacement.as_str()));
    let delta = builder.build();
    Some(delta.apply(&rope).to_string())
}

/// Sets (or with `None`, clears) the highlight marker on one line of the
/// active document.
///
/// A missing document or an out-of-range index is not an error: the request
/// came from a UI gesture and there is nothing useful to report, so it
/// degrades to a no-op outcome.
pub fn set_line_marker<S, A>(
    store: &S,
    active: &A,
    line_index: isize,
    color: Option<ColorTag>,
) -> Result<EditOutcome, IoError>
where
    S: DocumentStore,
    A: ActiveDocument<Handle = S::Handle>,
{
    let Some(handle) = active.active_document() else {
        log::debug!("No active document, ignoring marker edit");
        return Ok(EditOutcome::NoActiveDocument);
    };

    let text = store.read(&handle)?;
    let Some(updated) = rewrite_line_marker(&text, line_index, color) else {
        log::debug!("Line index {line_index} out of range, ignoring marker edit");
        return Ok(EditOutcome::LineOutOfRange);
    };

    if updated == text {
        log::debug!("Line {line_index} already has the requested marker");
        return Ok(EditOutcome::Unchanged);
    }

    store.write(&handle, &updated)?;
    match color {
        Some(color) => log::info!("Marked line {} as {color}", line_index + 1),
        None => log::info!("Cleared marker on line {}", line_index + 1),
    }
    Ok(EditOutcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::MemoryStore;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const DOC: &str = "# Title\n\nfirst line  \nsecond %hl-red%\n  indented\n";

    #[test]
    fn adds_marker_with_single_space() {
        let out = rewrite_line_marker("hello", 0, Some(ColorTag::Green)).unwrap();
        assert_eq!(out, "hello %hl-green%");
    }

    #[test]
    fn replaces_existing_marker() {
        let out = rewrite_line_marker(DOC, 3, Some(ColorTag::Blue)).unwrap();
        assert_eq!(out, DOC.replace("second %hl-red%", "second %hl-blue%"));
    }

    #[test]
    fn replaces_differently_cased_marker_and_spacing() {
        let out = rewrite_line_marker("x   %HL-Red%  ", 0, Some(ColorTag::Red)).unwrap();
        assert_eq!(out, "x %hl-red%");
    }

    #[test]
    fn clears_marker() {
        let out = rewrite_line_marker(DOC, 3, None).unwrap();
        assert_eq!(out, DOC.replace("second %hl-red%", "second"));
    }

    #[test]
    fn clearing_an_unmarked_line_changes_nothing() {
        let out = rewrite_line_marker(DOC, 2, None).unwrap();
        assert_eq!(out, DOC);
    }

    #[test]
    fn other_lines_are_byte_identical() {
        let out = rewrite_line_marker(DOC, 2, Some(ColorTag::Yellow)).unwrap();
        let before: Vec<_> = DOC.split('\n').collect();
        let after: Vec<_> = out.split('\n').collect();

        assert_eq!(before.len(), after.len());
        for (i, (b, a)) in before.iter().zip(after.iter()).enumerate() {
            if i == 2 {
                assert_eq!(*a, "first line %hl-yellow%");
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn setting_twice_is_idempotent() {
        let once = rewrite_line_marker(DOC, 4, Some(ColorTag::Green)).unwrap();
        let twice = rewrite_line_marker(&once, 4, Some(ColorTag::Green)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn set_then_clear_restores_line() {
        let marked = rewrite_line_marker(DOC, 4, Some(ColorTag::Green)).unwrap();
        let cleared = rewrite_line_marker(&marked, 4, None).unwrap();
        assert_eq!(cleared, DOC);
    }

    #[test]
    fn keeps_crlf_endings() {
        let out = rewrite_line_marker("a\r\nb\r\n", 0, Some(ColorTag::Pink)).unwrap();
        assert_eq!(out, "a %hl-pink%\r\nb\r\n");
    }

    #[test]
    fn mid_line_marker_is_left_alone() {
        let out = rewrite_line_marker("see %hl-red% here", 0, Some(ColorTag::Gray)).unwrap();
        assert_eq!(out, "see %hl-red% here %hl-gray%");
    }

    #[test]
    fn trailing_empty_line_is_addressable() {
        let out = rewrite_line_marker("a\n", 1, Some(ColorTag::Red)).unwrap();
        assert_eq!(out, "a\n %hl-red%");
    }

    #[rstest]
    #[case(-1)]
    #[case(6)]
    #[case(100)]
    fn out_of_range_is_none(#[case] index: isize) {
        assert_eq!(rewrite_line_marker(DOC, index, Some(ColorTag::Red)), None);
    }

    #[test]
    fn set_line_marker_writes_through_store() {
        let store = MemoryStore::with_document("note.md", "one\ntwo");
        let active = Some("note.md".to_string());

        let outcome = set_line_marker(&store, &active, 1, Some(ColorTag::Purple)).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(store.text("note.md"), "one\ntwo %hl-purple%");
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn set_line_marker_without_active_document_is_noop() {
        let store = MemoryStore::with_document("note.md", "one");
        let active: Option<String> = None;

        let outcome = set_line_marker(&store, &active, 0, Some(ColorTag::Red)).unwrap();

        assert_eq!(outcome, EditOutcome::NoActiveDocument);
        assert_eq!(store.writes(), 0);
    }

    #[rstest]
    #[case(-1)]
    #[case(2)]
    fn set_line_marker_out_of_range_leaves_text(#[case] index: isize) {
        let store = MemoryStore::with_document("note.md", "one\ntwo");
        let active = Some("note.md".to_string());

        let outcome = set_line_marker(&store, &active, index, Some(ColorTag::Red)).unwrap();

        assert_eq!(outcome, EditOutcome::LineOutOfRange);
        assert_eq!(store.text("note.md"), "one\ntwo");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn unchanged_text_is_not_written() {
        let store = MemoryStore::with_document("note.md", "one %hl-red%");
        let active = Some("note.md".to_string());

        let outcome = set_line_marker(&store, &active, 0, Some(ColorTag::Red)).unwrap();

        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(store.writes(), 0);
    }
}
