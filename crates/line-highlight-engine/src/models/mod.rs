pub mod document_ref;
pub mod highlights;

pub use document_ref::DocumentRef;
pub use highlights::{LineHighlight, count_by_color, scan_highlights};
