//! The Warden home directory.
//!
//! ```text
//! ~/.warden/                      (WardenHome)
//! ├── skills/
//! │   └── <document>/SKILL.md       (guidance documents)
//! └── config.toml                   (user config)
//!
//! <project>/.warden/
//! └── config.toml                   (workspace config)
//! ```

use std::path::{Path, PathBuf};

/// Global Warden home directory (`~/.warden/` or `$WARDEN_HOME`).
#[derive(Debug, Clone)]
pub struct WardenHome {
    root: PathBuf,
}

impl WardenHome {
    /// Create from an already resolved root.
    #[must_use]
    pub fn from_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Guidance documents (`~/.warden/skills/`).
    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    /// User configuration file (`~/.warden/config.toml`).
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Workspace configuration file (`<workspace>/.warden/config.toml`).
    #[must_use]
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(".warden").join("config.toml")
    }
}
