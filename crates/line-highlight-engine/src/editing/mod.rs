/*!
 * # Marker Editing
 *
 * Writes highlight markers back into the source text. The source document is
 * owned by the host; an edit is one read, one pure rewrite of a single line,
 * and one write through [`DocumentStore`](crate::host::DocumentStore).
 *
 * - **`lines`**: splits a rope into zero-based text lines with byte spans
 * - **`marker_editor`**: rewrites the trailing marker of one line
 *
 * The rewrite goes through an xi-rope delta over the target line's span, so
 * every byte outside that span is carried over verbatim.
 *
 * ```rust
 * use line_highlight_engine::editing::rewrite_line_marker;
 * use line_highlight_engine::grammar::ColorTag;
 *
 * let text = "first\nsecond";
 * let marked = rewrite_line_marker(text, 1, Some(ColorTag::Purple)).unwrap();
 * assert_eq!(marked, "first\nsecond %hl-purple%");
 *
 * let cleared = rewrite_line_marker(&marked, 1, None).unwrap();
 * assert_eq!(cleared, text);
 * ```
 */

pub mod lines;
pub mod marker_editor;

pub use lines::{Span, TextLine, text_lines};
pub use marker_editor::{EditOutcome, rewrite_line_marker, set_line_marker};
