use crate::error::Result;
use crate::paths;
use crate::types::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

pub const AUTO_CONFIRM_ENV: &str = "ANA_SPEKSI_AUTO_CONFIRM";

/// Written by `init` when no config exists yet.
pub const DEFAULT_CONFIG_YAML: &str = "\
# ana-speksi configuration
# Adjust these settings to match your project.

# Project context injected into all skill instructions.
context: |
  # Add your project context here.
  # Tech stack, conventions, constraints, etc.

# Skip interactive confirmation when accepting documents.
auto_confirm: false

# Per-phase rules (optional)
rules:
  proposal:
    - Keep proposals focused and concise
  storify:
    - Use WHEN/THEN format for acceptance scenarios
  taskify:
    - Each task should reference a skill
    - Include exact file paths
";

// ---------------------------------------------------------------------------
// ConfigWarning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub auto_confirm: bool,
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load `<root>/config.yaml`. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        let mut cfg = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                Config::default()
            } else {
                serde_yaml::from_str::<Option<Config>>(&data)?.unwrap_or_default()
            }
        } else {
            Config::default()
        };
        cfg.override_auto_confirm(std::env::var(AUTO_CONFIRM_ENV).ok().as_deref());
        Ok(cfg)
    }

    /// Like [`Config::load`] but never fails; problems are logged.
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(cfg) => {
                for w in cfg.validate() {
                    tracing::warn!("config: {}", w.message);
                }
                cfg
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    /// Trimmed project context, if any non-blank context is set.
    pub fn context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn rules_for(&self, phase: Phase) -> &[String] {
        self.rules
            .get(phase.as_str())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        self.rules
            .keys()
            .filter(|k| Phase::from_str(k).is_err())
            .map(|k| ConfigWarning {
                message: format!("unknown phase '{k}' in rules"),
            })
            .collect()
    }

    /// Apply the `ANA_SPEKSI_AUTO_CONFIRM` value, if set to a recognised flag.
    fn override_auto_confirm(&mut self, raw: Option<&str>) {
        if let Some(flag) = raw.and_then(parse_flag) {
            self.auto_confirm = flag;
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
