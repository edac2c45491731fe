//! Post-merge configuration validation.

use regex::RegexBuilder;
use std::collections::HashSet;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Longest allowed confirmation timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Validate a fully-merged configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_skills(config)?;
    validate_approval(config)?;
    validate_status(config)?;
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    Ok(())
}

fn check_regex(field: String, pattern: &str, ignore_case: bool) -> ConfigResult<()> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
        .map(|_| ())
        .map_err(|e| ConfigError::ValidationError {
            field,
            message: format!("invalid regex '{pattern}': {e}"),
        })
}

fn validate_skills(config: &Config) -> ConfigResult<()> {
    let s = &config.skills;

    if s.document_file.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "skills.document_file".to_owned(),
            message: "document_file must not be empty".to_owned(),
        });
    }

    let mut seen = HashSet::new();
    for (i, topic) in s.topics.iter().enumerate() {
        if topic.id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("skills.topics[{i}].id"),
                message: "topic id must not be empty".to_owned(),
            });
        }
        if topic.document.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("skills.topics[{i}].document"),
                message: format!("topic '{}' has an empty document", topic.id),
            });
        }
        if !seen.insert(topic.id.as_str()) {
            return Err(ConfigError::ValidationError {
                field: format!("skills.topics[{i}].id"),
                message: format!("duplicate topic id '{}'", topic.id),
            });
        }
        for (j, p) in topic.patterns.iter().enumerate() {
            check_regex(
                format!("skills.topics[{i}].patterns[{j}].regex"),
                &p.regex,
                p.ignore_case,
            )?;
        }
    }

    Ok(())
}

fn validate_approval(config: &Config) -> ConfigResult<()> {
    let a = &config.approval;

    if a.timeout_secs == 0 || a.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::ValidationError {
            field: "approval.timeout_secs".to_owned(),
            message: format!("timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}"),
        });
    }

    if a.shell_tool.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "approval.shell_tool".to_owned(),
            message: "shell_tool must not be empty".to_owned(),
        });
    }

    for (i, p) in a.risk_patterns.iter().enumerate() {
        check_regex(
            format!("approval.risk_patterns[{i}].regex"),
            &p.regex,
            p.ignore_case,
        )?;
    }

    Ok(())
}

fn validate_status(config: &Config) -> ConfigResult<()> {
    if config.status.branch_timeout_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "status.branch_timeout_ms".to_owned(),
            message: "branch_timeout_ms must be greater than zero".to_owned(),
        });
    }
    Ok(())
}
