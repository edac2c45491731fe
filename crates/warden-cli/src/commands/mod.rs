//! CLI commands.

pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod detect;
pub(crate) mod serve;
pub(crate) mod status;

use anyhow::Result;
use warden_config::{Config, ResolvedConfig};

/// Load the configuration for the current directory.
pub(crate) fn load_config() -> Result<ResolvedConfig> {
    let workspace_root = std::env::current_dir().ok();
    Ok(Config::load(workspace_root.as_deref())?)
}
