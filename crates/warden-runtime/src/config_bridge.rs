//! Bridge from `warden_config::Config` to domain types.
//!
//! The config crate depends on no other Warden crate; the conversions into
//! topic tables, risk policies, and log settings all happen here.

use std::time::Duration;

use warden_approval::{ApprovalResult, ConfirmationGate, RiskPattern, RiskPolicy};
use warden_config::Config;
use warden_skills::{PatternRule, SkillResult, Topic, TopicRegistry};
use warden_status::StatusTracker;
use warden_telemetry::{LogConfig, TelemetryResult};

/// Convert `[skills.topics]` to a [`TopicRegistry`].
///
/// # Errors
///
/// Returns a [`warden_skills::SkillError`] if a pattern does not compile or
/// topic ids collide.
pub fn to_topic_registry(cfg: &Config) -> SkillResult<TopicRegistry> {
    let topics = cfg
        .skills
        .topics
        .iter()
        .map(|t| {
            let rules = t
                .patterns
                .iter()
                .map(|p| PatternRule {
                    regex: p.regex.clone(),
                    ignore_case: p.ignore_case,
                })
                .collect();
            Topic::new(t.id.as_str(), t.document.as_str(), rules)
        })
        .collect::<SkillResult<Vec<_>>>()?;
    TopicRegistry::new(topics)
}

/// Convert `[approval.risk_patterns]` to a [`RiskPolicy`].
///
/// # Errors
///
/// Returns [`warden_approval::ApprovalError::InvalidPattern`] if a pattern
/// does not compile.
pub fn to_risk_policy(cfg: &Config) -> ApprovalResult<RiskPolicy> {
    let patterns = cfg
        .approval
        .risk_patterns
        .iter()
        .map(|p| RiskPattern::new(&p.regex, p.ignore_case, p.description.as_str()))
        .collect::<ApprovalResult<Vec<_>>>()?;
    Ok(RiskPolicy::new(patterns))
}

/// Convert `[approval]` to a [`ConfirmationGate`].
///
/// # Errors
///
/// Returns an [`warden_approval::ApprovalError`] for an invalid pattern or a
/// zero timeout.
pub fn to_confirmation_gate(cfg: &Config) -> ApprovalResult<ConfirmationGate> {
    ConfirmationGate::new(to_risk_policy(cfg)?)
        .with_shell_tool(cfg.approval.shell_tool.as_str())
        .with_timeout(Duration::from_secs(cfg.approval.timeout_secs))
}

/// Convert `[status]` to a [`StatusTracker`].
#[must_use]
pub fn to_status_tracker(cfg: &Config) -> StatusTracker {
    StatusTracker::new().with_branch_timeout(Duration::from_millis(cfg.status.branch_timeout_ms))
}

/// Convert `[logging]` to a [`LogConfig`].
///
/// # Errors
///
/// Returns a [`warden_telemetry::TelemetryError`] for an unknown format.
pub fn to_log_config(cfg: &Config) -> TelemetryResult<LogConfig> {
    LogConfig::from_section(&cfg.logging)
}
