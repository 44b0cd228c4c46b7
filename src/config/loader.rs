// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and preset resolution.

use crate::error::{ConfigError, LintError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::default::preset;
use super::schema::{LintConfig, RuleSetting};

/// Configuration file names to search for, in order of priority.
pub const CONFIG_FILES: &[&str] = &["cmlint.toml", ".cmlint.toml", ".config/cmlint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if let Some(found) = first_existing(&current) {
            return Some(found);
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(found) = first_existing(&home) {
            return Some(found);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("cmlint").join("config.toml");
        if path.exists() {
            return Some(path);
        }
    }

    None
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<LintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(LintConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<LintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(LintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<LintConfig> {
    toml::from_str(content).map_err(|e| {
        LintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Resolve `extends` and `rules` into the effective rule table.
///
/// Presets are applied in order; later presets and then the configured
/// rules override earlier entries of the same name.
pub fn resolve_rules(config: &LintConfig) -> Result<BTreeMap<String, RuleSetting>> {
    let mut resolved = BTreeMap::new();

    for name in &config.extends {
        let rules = preset(name).ok_or_else(|| {
            LintError::Config(ConfigError::UnknownPreset { name: name.clone() })
        })?;
        tracing::debug!("Extending preset '{}' ({} rules)", name, rules.len());
        resolved.extend(rules);
    }

    resolved.extend(
        config
            .rules
            .iter()
            .map(|(name, setting)| (name.clone(), setting.clone())),
    );

    Ok(resolved)
}
