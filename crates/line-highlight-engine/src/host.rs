//! Interfaces to the application hosting the highlighter.

use crate::io::IoError;

/// Reads and writes the full text of a document.
pub trait DocumentStore {
    type Handle;

    fn read(&self, handle: &Self::Handle) -> Result<String, IoError>;

    fn write(&self, handle: &Self::Handle, text: &str) -> Result<(), IoError>;
}

/// Resolves the document the user is currently editing, if any.
pub trait ActiveDocument {
    type Handle;

    fn active_document(&self) -> Option<Self::Handle>;
}

impl<H: Clone> ActiveDocument for Option<H> {
    type Handle = H;

    fn active_document(&self) -> Option<H> {
        self.clone()
    }
}
