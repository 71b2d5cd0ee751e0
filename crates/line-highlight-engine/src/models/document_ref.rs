use relative_path::{RelativePath, RelativePathBuf};

/// A markdown note addressed relative to the notes root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    relative_path: RelativePathBuf,
    title: String,
}

impl DocumentRef {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let title = relative_path
            .file_name()
            .map(|name| name.strip_suffix(".md").unwrap_or(name))
            .unwrap_or("Untitled")
            .to_string();
        Self {
            relative_path,
            title,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the `.md` extension.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Relative path without the `.md` extension, for headings.
    pub fn display_path(&self) -> &str {
        let path = self.relative_path.as_str();
        path.strip_suffix(".md").unwrap_or(path)
    }
}

impl From<&str> for DocumentRef {
    fn from(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_drops_extension_and_folders() {
        let doc = DocumentRef::from("journal/2026/today.md");
        assert_eq!(doc.title(), "today");
        assert_eq!(doc.display_path(), "journal/2026/today");
        assert_eq!(doc.relative_path().as_str(), "journal/2026/today.md");
    }

    #[test]
    fn title_without_extension_is_kept() {
        assert_eq!(DocumentRef::from("README").title(), "README");
    }
}
