// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmlint - commit message linter
///
/// Checks commit messages against conventional commit rules, a required
/// Signed-off-by trailer and the position of cherry-pick annotations.
#[derive(Parser, Debug)]
#[command(name = "cmlint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CMLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Lint a commit message from an argument, a file or stdin
    Lint(LintArgs),

    /// Lint existing commits
    Check(CheckArgs),

    /// List the enabled rules
    Rules,

    /// Manage the commit-msg hook
    Hooks(HooksArgs),

    /// Write a cmlint.toml in the current directory
    Init(InitArgs),

    /// Print the resolved configuration
    PrintConfig,

    /// Print version information
    Version,
}

/// Arguments for the lint command.
#[derive(Parser, Debug, Default, Clone)]
pub struct LintArgs {
    /// Message to lint (reads stdin when omitted)
    #[arg(conflicts_with = "edit")]
    pub message: Option<String>,

    /// Read the message from a file (default: .git/COMMIT_EDITMSG)
    #[arg(short, long, value_name = "FILE", num_args = 0..=1)]
    pub edit: Option<Option<PathBuf>>,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Commit or range to check (`HEAD`, `main..HEAD`)
    #[arg(default_value = "HEAD")]
    pub target: String,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install git hooks
    Install {
        /// Specific hook to install
        #[arg(value_name = "HOOK")]
        hook: Option<String>,

        /// Replace an existing hook (it is kept as a backup)
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall git hooks
    Uninstall {
        /// Specific hook to uninstall
        #[arg(value_name = "HOOK")]
        hook: Option<String>,
    },

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lint_message() {
        let args = Cli::parse_from(["cmlint", "lint", "feat: add x"]);
        if let Commands::Lint(lint) = args.command {
            assert_eq!(lint.message.as_deref(), Some("feat: add x"));
            assert!(lint.edit.is_none());
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn test_parse_lint_edit() {
        let args = Cli::parse_from(["cmlint", "lint", "--edit"]);
        let Commands::Lint(lint) = args.command else {
            panic!("Expected Lint command");
        };
        assert_eq!(lint.edit, Some(None));

        let args = Cli::parse_from(["cmlint", "lint", "--edit", "msg.txt", "--strict"]);
        let Commands::Lint(lint) = args.command else {
            panic!("Expected Lint command");
        };
        assert_eq!(lint.edit, Some(Some(PathBuf::from("msg.txt"))));
        assert!(lint.strict);
    }

    #[test]
    fn test_parse_check() {
        let args = Cli::parse_from(["cmlint", "check", "HEAD~5..HEAD", "--strict"]);
        if let Commands::Check(check_args) = args.command {
            assert_eq!(check_args.target, "HEAD~5..HEAD");
            assert!(check_args.strict);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_parse_check_default_target() {
        let args = Cli::parse_from(["cmlint", "check"]);
        let Commands::Check(check_args) = args.command else {
            panic!("Expected Check command");
        };
        assert_eq!(check_args.target, "HEAD");
    }

    #[test]
    fn test_parse_hooks() {
        let args = Cli::parse_from(["cmlint", "hooks", "install", "--force"]);
        assert!(matches!(
            args.command,
            Commands::Hooks(HooksArgs {
                action: HooksAction::Install { force: true, .. }
            })
        ));
    }

    #[test]
    fn test_global_flags() {
        let args = Cli::parse_from(["cmlint", "--format", "json", "--no-color", "rules"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.no_color);
        assert!(matches!(args.command, Commands::Rules));
    }
}
