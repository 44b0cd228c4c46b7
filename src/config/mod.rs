// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cmlint.
//!
//! This module handles loading and parsing `cmlint.toml`, and resolving
//! presets into the effective rule table.

pub mod default;
mod loader;
mod schema;

pub use loader::{find_config_file, load_config, parse_config, resolve_rules, CONFIG_FILES};
pub use schema::*;
