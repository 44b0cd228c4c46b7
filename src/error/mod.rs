// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for cmlint.
//!
//! Rule failures are not errors: they are collected into a
//! [`LintReport`](crate::rules::LintReport). The types here cover the
//! operational side (configuration, git access, hooks, I/O) plus the single
//! [`LintError::Lint`] variant used to turn a failed report into an exit code.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cmlint operations.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    /// Linting completed and found problems.
    #[error("found {errors} problems, {warnings} warnings")]
    Lint { errors: usize, warnings: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Unknown preset '{name}' in extends")]
    UnknownPreset { name: String },

    #[error("Found invalid rule names: {names}")]
    UnknownRules { names: String },

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnore { pattern: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Hook-related errors.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to install hook '{hook}': {message}")]
    InstallFailed { hook: String, message: String },

    #[error("Hook already exists: {hook} (use --force to replace it)")]
    AlreadyExists { hook: String },

    #[error("Hook not found: {hook}")]
    NotFound { hook: String },

    #[error("Failed to remove hook '{hook}': {message}")]
    RemoveFailed { hook: String, message: String },

    #[error("Failed to render hook '{hook}': {message}")]
    RenderFailed { hook: String, message: String },
}

/// Errors reading a commit message.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Failed to read commit message from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to read commit message from stdin: {message}")]
    StdinFailed { message: String },
}

/// Result type alias for cmlint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
