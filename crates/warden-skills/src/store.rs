//! Guidance-document stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::topic::DocumentId;

/// File name of a document inside its directory.
pub const DEFAULT_DOCUMENT_FILE: &str = "SKILL.md";

/// Resolves a document id to its text.
///
/// A missing document is a normal outcome, not an error. Implementations
/// must not cache: every call reflects the store's current contents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load a document's text, or `None` if it does not exist.
    async fn load(&self, document: &DocumentId) -> Option<String>;
}

/// Reads `<base>/<document>/SKILL.md` from disk.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    base: PathBuf,
    file_name: String,
}

impl FsDocumentStore {
    /// Create a store rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            file_name: DEFAULT_DOCUMENT_FILE.to_string(),
        }
    }

    /// Use a different per-document file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// The store root.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path a document would be read from.
    #[must_use]
    pub fn document_path(&self, document: &DocumentId) -> PathBuf {
        self.base.join(document.as_str()).join(&self.file_name)
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn load(&self, document: &DocumentId) -> Option<String> {
        let path = self.document_path(document);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(document = %document, path = %path.display(), "Loaded guidance document");
                Some(content)
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(document = %document, path = %path.display(), "Guidance document not found");
                None
            },
            Err(e) => {
                warn!(document = %document, path = %path.display(), error = %e, "Failed to read guidance document");
                None
            },
        }
    }
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<String, String>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(document.into(), content.into());
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, document: &DocumentId) -> Option<String> {
        self.documents.get(document.as_str()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test::SkillsDir;

    #[tokio::test]
    async fn test_fs_store_reads_skill_file() {
        let dir = SkillsDir::new().with_document("python-dev-guidelines", "# Py");
        let store = FsDocumentStore::new(dir.path());
        let doc = DocumentId::new("python-dev-guidelines");

        assert_eq!(store.load(&doc).await.as_deref(), Some("# Py"));
        assert!(store.document_path(&doc).ends_with("python-dev-guidelines/SKILL.md"));
    }

    #[tokio::test]
    async fn test_fs_store_missing_is_none() {
        let dir = SkillsDir::new();
        let store = FsDocumentStore::new(dir.path());
        assert!(store.load(&DocumentId::new("nope")).await.is_none());
    }

    #[tokio::test]
    async fn test_fs_store_does_not_cache() {
        let dir = SkillsDir::new();
        let store = FsDocumentStore::new(dir.path());
        let doc = DocumentId::new("late");
        assert!(store.load(&doc).await.is_none());

        let dir = dir.with_document("late", "now here");
        assert_eq!(store.load(&doc).await.as_deref(), Some("now here"));
        drop(dir);
    }

    #[tokio::test]
    async fn test_custom_file_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("doc")).unwrap();
        std::fs::write(tmp.path().join("doc").join("README.md"), "alt").unwrap();

        let store = FsDocumentStore::new(tmp.path()).with_file_name("README.md");
        assert_eq!(store.load(&DocumentId::new("doc")).await.as_deref(), Some("alt"));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryDocumentStore::new().with_document("a", "text");
        assert_eq!(store.load(&DocumentId::new("a")).await.as_deref(), Some("text"));
        assert!(store.load(&DocumentId::new("b")).await.is_none());
    }
}
