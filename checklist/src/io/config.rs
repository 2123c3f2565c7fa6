//! Checklist configuration stored under `.checklist/config.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::graph::PrerequisitePolicy;

/// Storage key used by the browser front end for the approved-course list.
pub const DEFAULT_STORAGE_KEY: &str = "approvedCourses";

/// Checklist configuration (TOML).
///
/// Meant to be edited by hand. Missing fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChecklistConfig {
    /// Key under which the approved-course list is stored.
    pub storage_key: String,

    /// Reject catalogs whose prerequisites name unknown courses.
    pub strict_prerequisites: bool,

    pub feedback: FeedbackConfig,
}

/// Durations for transient rejection feedback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedbackConfig {
    /// How long the clicked course shows the blocked pulse.
    pub blocked_pulse_ms: u64,

    /// How long the rejection message stays visible.
    pub message_ttl_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            blocked_pulse_ms: 1_000,
            message_ttl_ms: 5_000,
        }
    }
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            strict_prerequisites: false,
            feedback: FeedbackConfig::default(),
        }
    }
}

impl ChecklistConfig {
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(anyhow!("storage_key must be non-empty"));
        }
        if self.feedback.blocked_pulse_ms == 0 {
            return Err(anyhow!("feedback.blocked_pulse_ms must be > 0"));
        }
        if self.feedback.message_ttl_ms == 0 {
            return Err(anyhow!("feedback.message_ttl_ms must be > 0"));
        }
        Ok(())
    }

    pub fn prerequisite_policy(&self) -> PrerequisitePolicy {
        if self.strict_prerequisites {
            PrerequisitePolicy::Strict
        } else {
            PrerequisitePolicy::Permissive
        }
    }
}

impl FeedbackConfig {
    pub fn blocked_pulse(&self) -> Duration {
        Duration::from_millis(self.blocked_pulse_ms)
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.message_ttl_ms)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ChecklistConfig::default()`.
pub fn load_config(path: &Path) -> Result<ChecklistConfig> {
    if !path.exists() {
        let cfg = ChecklistConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ChecklistConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ChecklistConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
