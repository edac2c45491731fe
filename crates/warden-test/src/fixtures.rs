//! Test fixtures for common types.

use std::path::Path;
use tempfile::TempDir;

use warden_core::ToolInvocation;

/// A shell-tool invocation running `command`.
#[must_use]
pub fn bash_call(command: &str) -> ToolInvocation {
    ToolInvocation::new("bash").with_arg("command", command)
}

/// A file tool invocation (`read`, `edit`, `write`) on `path`.
#[must_use]
pub fn file_call(tool: &str, path: &str) -> ToolInvocation {
    ToolInvocation::new(tool).with_arg("path", path)
}

/// A temporary guidance-document store laid out as
/// `<root>/<document>/SKILL.md`.
#[derive(Debug)]
pub struct SkillsDir {
    dir: TempDir,
}

impl SkillsDir {
    /// Create an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp skills dir"),
        }
    }

    /// Write a document.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_document(self, document: &str, content: &str) -> Self {
        let doc_dir = self.dir.path().join(document);
        std::fs::create_dir_all(&doc_dir).expect("create document dir");
        std::fs::write(doc_dir.join("SKILL.md"), content).expect("write SKILL.md");
        self
    }

    /// The store root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for SkillsDir {
    fn default() -> Self {
        Self::new()
    }
}

/// A store holding the three default guidance documents.
#[must_use]
pub fn default_skills_dir() -> SkillsDir {
    SkillsDir::new()
        .with_document("python-dev-guidelines", "# Python guidelines")
        .with_document("shell-script-guidelines", "# Shell guidelines")
        .with_document("brave-search", "# Search guidelines")
}
