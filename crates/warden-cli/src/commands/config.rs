//! CLI handlers for the `warden config` subcommand.

use std::path::Path;

use anyhow::Result;
use warden_config::Config;
use warden_core::WardenHome;
use warden_runtime::WardenRuntime;

use super::load_config;
use crate::theme::Theme;

/// Print the merged configuration.
pub(crate) fn show_config() -> Result<()> {
    let resolved = load_config()?;
    let output = resolved
        .to_toml()
        .map_err(|e| anyhow::anyhow!("failed to format config: {e}"))?;

    println!("{output}");
    Ok(())
}

/// Load the configuration and build every handler from it.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn validate_config() -> Result<bool> {
    let workspace_root = std::env::current_dir().ok();

    let resolved = match Config::load(workspace_root.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("Configuration error: {e}")));
            return Ok(false);
        },
    };
    if let Err(e) = WardenRuntime::from_config(&resolved) {
        eprintln!("{}", Theme::error(&format!("Configuration error: {e}")));
        return Ok(false);
    }

    println!("{}", Theme::success("Configuration is valid."));
    if !resolved.loaded_files.is_empty() {
        println!("\nLoaded files:");
        for path in &resolved.loaded_files {
            println!("  - {path}");
        }
    }
    Ok(true)
}

/// Show the config files that are checked, lowest precedence first.
pub(crate) fn show_paths() -> Result<()> {
    let resolved = load_config()?;
    let home = WardenHome::from_path(&resolved.home);

    let mut paths = vec![home.config_path()];
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(WardenHome::workspace_config_path(&cwd));
    }

    println!("Configuration files checked (in precedence order):\n");
    println!("  0. <built-in defaults>");
    for (i, path) in paths.iter().enumerate() {
        println!("  {}. {}  [{}]", i.saturating_add(1), path.display(), found(path));
    }

    let skills = resolved.skills_dir();
    println!("\n{}  [{}]", Theme::kv("Skills", &skills.display().to_string()), found(&skills));
    Ok(())
}

fn found(path: &Path) -> &'static str {
    if path.exists() { "found" } else { "not found" }
}
