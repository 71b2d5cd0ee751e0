pub mod editing;
pub mod grammar;
pub mod host;
pub mod interaction;
pub mod io;
pub mod models;
pub mod nodes;
pub mod render;
pub mod style;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{EditOutcome, rewrite_line_marker, set_line_marker};
pub use grammar::{ColorTag, PALETTE, UnknownColor, marker_token};
pub use host::{ActiveDocument, DocumentStore};
pub use interaction::{ClickOutcome, InteractionController, Palette, PaletteChoice};
pub use io::{FileStore, IoError};
pub use models::{DocumentRef, LineHighlight, scan_highlights};
pub use nodes::{Block, BlockKind, Element, Node, render_document_html};
pub use render::{process_block, process_blocks, render_live_lines, render_reading_view};
