// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from cmlint.toml.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::default::{canonical_rules, CONVENTIONAL_PRESET, DEFAULT_HELP_URL};

/// The main configuration structure for cmlint.
///
/// A missing key takes its value from the canonical project configuration,
/// so an empty file behaves exactly like having no file at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Presets whose rules are applied before `rules`.
    pub extends: Vec<String>,

    /// Rule settings, keyed by rule name. These override preset entries.
    pub rules: BTreeMap<String, RuleSetting>,

    /// Help text printed after a report with problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Extra regexes; a message matching any of them is not linted.
    pub ignores: Vec<String>,

    /// Whether the built-in ignores (merges, reverts, fixups) apply.
    pub default_ignores: bool,

    /// Hook configuration.
    pub hooks: HooksConfig,

    /// Output configuration.
    pub ui: UiConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            extends: vec![CONVENTIONAL_PRESET.to_string()],
            rules: canonical_rules(),
            help_url: Some(DEFAULT_HELP_URL.to_string()),
            ignores: Vec::new(),
            default_ignores: true,
            hooks: HooksConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// How severe a rule violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    /// Level 0: the rule is not evaluated.
    Disabled,
    /// Level 1: violations are reported but do not fail the lint.
    Warning,
    /// Level 2: violations fail the lint.
    Error,
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, String> {
        match level {
            0 => Ok(Severity::Disabled),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!(
                "invalid rule level {}, expected 0 (disabled), 1 (warning) or 2 (error)",
                other
            )),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> u8 {
        match severity {
            Severity::Disabled => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Disabled => "off",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.pad(name)
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Apply the applicability to a raw condition.
    pub fn expect(self, condition: bool) -> bool {
        match self {
            Applicability::Always => condition,
            Applicability::Never => !condition,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

/// A rule argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(usize),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    pub fn as_number(&self) -> Option<usize> {
        match self {
            RuleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View the value as a list; a single text value becomes a one-item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            RuleValue::Text(s) => vec![s.as_str()],
            RuleValue::List(items) => items.iter().map(String::as_str).collect(),
            RuleValue::Number(_) => Vec::new(),
        }
    }
}

impl std::fmt::Display for RuleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Text(s) => write!(f, "{:?}", s),
            RuleValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Settings for a single rule.
///
/// Accepts both the array form `[2, "always", 100]` and a table
/// `{ level = 2, when = "always", value = 100 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetting {
    pub level: Severity,

    #[serde(default)]
    pub when: Applicability,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
}

impl RuleSetting {
    pub fn new(level: Severity, when: Applicability) -> Self {
        Self {
            level,
            when,
            value: None,
        }
    }

    pub fn with_value(mut self, value: RuleValue) -> Self {
        self.value = Some(value);
        self
    }
}

/// Hooks configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HooksConfig {
    /// Additional arguments passed to `cmlint lint` from the commit-msg hook.
    pub args: Vec<String>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
