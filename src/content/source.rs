//! Content sources - where markdown files are discovered and read from

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A markdown file found under the content root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Location of the file, as understood by its source
    pub path: PathBuf,
    /// Post identifier derived from the file name
    pub slug: String,
}

impl SourceFile {
    /// Build a source file entry if `path` names a markdown file
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if !is_markdown_file(&path) {
            return None;
        }
        let slug = path.file_stem()?.to_str()?.to_string();
        Some(Self { path, slug })
    }
}

/// Lists and reads the markdown files of a content tree.
///
/// `list_markdown` must return files in a stable order for an unchanged
/// tree; the repository relies on it for tie-breaking and duplicate slugs.
pub trait ContentSource: Send + Sync {
    /// Whether the content root exists at all
    fn exists(&self) -> bool;

    /// Every markdown file in the tree, at any depth
    fn list_markdown(&self) -> Vec<SourceFile>;

    /// Read the full text of a listed file
    fn read(&self, file: &SourceFile) -> io::Result<String>;
}

/// Content stored in a directory tree on disk
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for FsSource {
    fn exists(&self) -> bool {
        self.root.is_dir()
    }

    fn list_markdown(&self) -> Vec<SourceFile> {
        if !self.exists() {
            return Vec::new();
        }

        WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", self.root, e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| SourceFile::from_path(entry.into_path()))
            .collect()
    }

    fn read(&self, file: &SourceFile) -> io::Result<String> {
        fs::read_to_string(&file.path)
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_file_from_path() {
        let file = SourceFile::from_path("posts/2024/hello-world.md").unwrap();
        assert_eq!(file.slug, "hello-world");
        assert!(SourceFile::from_path("posts/cover.png").is_none());
        assert_eq!(
            SourceFile::from_path("notes.markdown").map(|f| f.slug),
            Some("notes".to_string())
        );
    }

    #[test]
    fn test_missing_root_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let source = FsSource::new(dir.path().join("nope"));
        assert!(!source.exists());
        assert!(source.list_markdown().is_empty());
    }

    #[test]
    fn test_walks_nested_directories_in_name_order() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/deep/er")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/deep/er/three.md"), "x").unwrap();
        fs::write(root.join("a/two.md"), "x").unwrap();
        fs::write(root.join("one.md"), "x").unwrap();
        fs::write(root.join("a/image.png"), "x").unwrap();
        // A directory named like a markdown file is not a post
        fs::create_dir_all(root.join("folder.md")).unwrap();

        let source = FsSource::new(root);
        let slugs: Vec<_> = source.list_markdown().into_iter().map(|f| f.slug).collect();
        assert_eq!(slugs, vec!["two", "three", "one"]);

        let again: Vec<_> = source.list_markdown().into_iter().map(|f| f.slug).collect();
        assert_eq!(slugs, again);
    }
}
