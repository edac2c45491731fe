//! Config file discovery and layered loading.
//!
//! 1. Parse embedded `defaults.toml` → base
//! 2. Merge `<warden home>/config.toml` (user)
//! 3. Merge `<workspace>/.warden/config.toml` (workspace)
//! 4. Deserialize the merged tree → [`Config`]
//! 5. Validate

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
pub const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration and where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// The merged configuration.
    pub config: Config,
    /// Home directory used for the user layer.
    pub home: PathBuf,
    /// Files that contributed, in merge order.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// Render the merged configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if rendering fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(&self.config)?)
    }

    /// Directory guidance documents are read from.
    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.config
            .skills
            .base_dir
            .clone()
            .unwrap_or_else(|| self.home.join("skills"))
    }
}

/// Load the configuration with layered file precedence.
///
/// `workspace_root` is the root of the current project; if `None`, the
/// workspace layer is skipped. `home_override` replaces the resolved Warden
/// home directory.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, or if the
/// merged configuration fails validation.
pub fn load(workspace_root: Option<&Path>, home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let home = match home_override {
        Some(h) => h.to_path_buf(),
        None => warden_home()?,
    };

    // 1. Embedded defaults.
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;
    let mut loaded_files = Vec::new();

    // 2. User config.
    let user_path = home.join("config.toml");
    if let Some(overlay) = try_load_file(&user_path)? {
        deep_merge(&mut merged, &overlay);
        loaded_files.push(user_path.display().to_string());
        info!(path = %user_path.display(), "loaded user config");
    }

    // 3. Workspace config.
    if let Some(ws_root) = workspace_root {
        let ws_path = ws_root.join(".warden").join("config.toml");
        if let Some(overlay) = try_load_file(&ws_path)? {
            deep_merge(&mut merged, &overlay);
            loaded_files.push(ws_path.display().to_string());
            info!(path = %ws_path.display(), "loaded workspace config");
        }
    }

    // 4. Deserialize.
    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    // 5. Validate.
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        home,
        loaded_files,
    })
}

/// Load a config from a single file layered over the defaults.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, malformed, or invalid.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })?;

    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;
    deep_merge(&mut merged, &overlay);

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: path.display().to_string(),
                source: e,
            })?;
    validate::validate(&config)?;
    Ok(config)
}

/// Try to load a file, returning `None` if the file doesn't exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    // Size is checked after reading so there is no stat/read race.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(Some(value))
}

/// Resolve the Warden home: `$WARDEN_HOME` if absolute, else `~/.warden`.
fn warden_home() -> ConfigResult<PathBuf> {
    if let Ok(custom) = std::env::var("WARDEN_HOME") {
        let p = PathBuf::from(&custom);
        if p.is_absolute() {
            return Ok(p);
        }
        tracing::warn!(path = %custom, "WARDEN_HOME is not absolute; ignoring");
    }

    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".warden"))
        .ok_or(ConfigError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_defaults_deserialize_to_default_config() {
        let config: Config = toml::from_str(DEFAULTS_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_with_no_files() {
        let home = tempfile::tempdir().unwrap();
        let resolved = load(None, Some(home.path())).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert!(resolved.loaded_files.is_empty());
        assert_eq!(resolved.skills_dir(), home.path().join("skills"));
    }

    #[test]
    fn test_workspace_overrides_user() {
        let home = tempfile::tempdir().unwrap();
        let ws = tempfile::tempdir().unwrap();
        write(
            &home.path().join("config.toml"),
            "[approval]\ntimeout_secs = 10\nshell_tool = \"sh\"\n",
        );
        write(
            &ws.path().join(".warden").join("config.toml"),
            "[approval]\ntimeout_secs = 5\n",
        );

        let resolved = load(Some(ws.path()), Some(home.path())).unwrap();
        assert_eq!(resolved.config.approval.timeout_secs, 5);
        assert_eq!(resolved.config.approval.shell_tool, "sh");
        assert!(resolved.config.approval.enabled);
        assert_eq!(resolved.loaded_files.len(), 2);
    }

    #[test]
    fn test_topic_array_replaces_defaults() {
        let home = tempfile::tempdir().unwrap();
        write(
            &home.path().join("config.toml"),
            r#"
[[skills.topics]]
id = "rust"
document = "rust-guidelines"
patterns = [{ regex = '\.rs\b' }]
"#,
        );

        let resolved = load(None, Some(home.path())).unwrap();
        let topics = &resolved.config.skills.topics;
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, "rust");
        assert!(!topics[0].patterns[0].ignore_case);
    }

    #[test]
    fn test_base_dir_override() {
        let home = tempfile::tempdir().unwrap();
        write(
            &home.path().join("config.toml"),
            "[skills]\nbase_dir = \"/opt/skills\"\n",
        );
        let resolved = load(None, Some(home.path())).unwrap();
        assert_eq!(resolved.skills_dir(), PathBuf::from("/opt/skills"));
    }

    #[test]
    fn test_invalid_layer_fails_validation() {
        let home = tempfile::tempdir().unwrap();
        write(&home.path().join("config.toml"), "[approval]\ntimeout_secs = 0\n");
        assert!(matches!(
            load(None, Some(home.path())),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let home = tempfile::tempdir().unwrap();
        write(&home.path().join("config.toml"), "[approval\n");
        assert!(matches!(
            load(None, Some(home.path())),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("huge.toml");
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        std::fs::write(&file_path, data).unwrap();

        assert!(matches!(
            try_load_file(&file_path),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_load_file_missing() {
        assert!(matches!(
            load_file(Path::new("/nonexistent/config.toml")),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn test_show_round_trips() {
        let home = tempfile::tempdir().unwrap();
        let resolved = load(None, Some(home.path())).unwrap();
        let rendered = resolved.to_toml().unwrap();
        let back: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(back, resolved.config);
    }
}
