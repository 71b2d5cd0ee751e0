use crate::host::DocumentStore;
use crate::models::DocumentRef;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Path is outside the notes directory: {0}")]
    OutsideNotesDir(PathBuf),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for markdown files in the notes directory
pub fn scan_markdown_files(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !notes_root.exists() {
        return Err(IoError::InvalidNotesDir(
            "notes directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Every markdown note under the root, sorted by path
pub fn list_documents(notes_root: &Path) -> Result<Vec<DocumentRef>, IoError> {
    scan_markdown_files(notes_root)?
        .into_iter()
        .map(|path| {
            let relative = path
                .strip_prefix(notes_root)
                .map_err(|_| IoError::OutsideNotesDir(path.clone()))?;
            RelativePathBuf::from_path(relative)
                .map(DocumentRef::new)
                .map_err(|_| IoError::OutsideNotesDir(path.clone()))
        })
        .collect()
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Document store backed by files under a notes directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    notes_root: PathBuf,
}

impl FileStore {
    pub fn new(notes_root: impl Into<PathBuf>) -> Self {
        Self {
            notes_root: notes_root.into(),
        }
    }

    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }
}

impl DocumentStore for FileStore {
    type Handle = DocumentRef;

    fn read(&self, handle: &DocumentRef) -> Result<String, IoError> {
        read_file(handle.relative_path(), &self.notes_root)
    }

    fn write(&self, handle: &DocumentRef, text: &str) -> Result<(), IoError> {
        write_file(handle.relative_path(), &self.notes_root, text)
    }
}
