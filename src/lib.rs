// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmlint - commit message linter
//!
//! Lints git commit messages against a configurable rule table.
//!
//! # Features
//!
//! - **Trailer rules**: a `Signed-off-by` trailer is required and a
//!   `(cherry picked from commit ...)` annotation must be the last line
//! - **Conventional rules**: type, scope, subject, header, body and footer
//!   checks from the `conventional` preset
//! - **Severity table**: every rule is off, a warning or an error, with
//!   `always`/`never` applicability
//! - **Git integration**: lint `COMMIT_EDITMSG`, single commits or ranges
//! - **Git hooks**: install a `commit-msg` hook without shell boilerplate
//!
//! # Example
//!
//! ```
//! use cmlint::config::LintConfig;
//! use cmlint::rules::RuleEngine;
//!
//! let engine = RuleEngine::new(LintConfig::default()).unwrap();
//!
//! let report = engine.lint("feat: add x\n\nSigned-off-by: Jane Doe <jane@example.com>");
//! assert!(report.is_valid());
//!
//! let report = engine.lint("feat: add x");
//! assert_eq!(report.errors[0].rule, "signed-off-anywhere");
//! ```

pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod hooks;
pub mod rules;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{LintError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
