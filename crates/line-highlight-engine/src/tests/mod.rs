use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::host::DocumentStore;
use crate::io::IoError;

/// Create a temporary notes directory with test files
pub fn create_test_notes_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test markdown file with content
pub fn create_test_file(notes_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = notes_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// In-memory document store that counts writes
#[derive(Default)]
pub struct MemoryStore {
    documents: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn with_document(name: &str, text: &str) -> Self {
        let store = Self::default();
        store
            .documents
            .borrow_mut()
            .insert(name.to_string(), text.to_string());
        store
    }

    pub fn text(&self, name: &str) -> String {
        self.documents.borrow()[name].clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl DocumentStore for MemoryStore {
    type Handle = String;

    fn read(&self, handle: &String) -> Result<String, IoError> {
        self.documents
            .borrow()
            .get(handle)
            .cloned()
            .ok_or_else(|| IoError::NotFound(PathBuf::from(handle)))
    }

    fn write(&self, handle: &String, text: &str) -> Result<(), IoError> {
        self.documents
            .borrow_mut()
            .insert(handle.clone(), text.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
