// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::commit::strip_comments;
use crate::config::{default::example_config, resolve_rules, LintConfig};
use crate::error::{ConfigError, LintError, MessageError, Result, ResultExt};
use crate::git;
use crate::rules::{LintReport, RuleEngine};

use super::args::{CheckArgs, Cli, Commands, HooksAction, HooksArgs, InitArgs, LintArgs, OutputFormat};

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        disable_colors();
    }

    // `init` and `version` work without a readable configuration, so that
    // `init --force` can replace a broken file.
    match cli.command.clone() {
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
        Commands::Lint(args) => run_lint(&cli, load_config(&cli)?, args),
        Commands::Check(args) => run_check(&cli, load_config(&cli)?, args),
        Commands::Rules => run_rules(&cli, load_config(&cli)?),
        Commands::Hooks(args) => run_hooks(&load_config(&cli)?, args),
        Commands::PrintConfig => run_print_config(load_config(&cli)?),
    }
}

fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

/// Load the configuration named by `--config`, or search for one.
fn load_config(cli: &Cli) -> Result<LintConfig> {
    let config = match &cli.config {
        Some(config_path) => LintConfig::load_from(config_path)?,
        None => LintConfig::load()?,
    };

    if !config.ui.color {
        disable_colors();
    }

    Ok(config)
}

/// Turn reports into the command result: errors fail, warnings fail in
/// strict mode.
fn finish(reports: &[LintReport], strict: bool) -> Result<()> {
    let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();

    if errors > 0 || (strict && warnings > 0) {
        Err(LintError::Lint { errors, warnings })
    } else {
        Ok(())
    }
}

/// Run the lint command.
fn run_lint(cli: &Cli, config: LintConfig, args: LintArgs) -> Result<()> {
    tracing::debug!("Running lint command with args: {:?}", args);

    let input = match (&args.message, &args.edit) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => read_edit_file(path.as_deref())?,
        (None, None) => read_stdin()?,
    };

    let engine = RuleEngine::new(config)?;
    let report = engine.lint(&input);
    report.print(cli.format, engine.config().help_url.as_deref());

    finish(std::slice::from_ref(&report), args.strict)
}

/// Read a commit message file the way git would use it.
fn read_edit_file(path: Option<&Path>) -> Result<String> {
    let repo = git::open_repo().ok();
    let path: PathBuf = match (path, &repo) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(repo)) => repo.commit_editmsg_path(),
        (None, None) => return Err(LintError::Git(crate::error::GitError::NotARepository)),
    };
    let comment_char = repo.as_ref().map_or('#', |r| r.comment_char());

    tracing::debug!("Reading commit message from {:?}", path);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        LintError::Message(MessageError::ReadFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    })?;

    Ok(strip_comments(&content, comment_char))
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(LintError::WithContext {
            context: "lint".to_string(),
            message: "no input: pass a message, use --edit or pipe one on stdin".to_string(),
        });
    }

    let mut input = String::new();
    stdin.read_to_string(&mut input).map_err(|e| {
        LintError::Message(MessageError::StdinFailed {
            message: e.to_string(),
        })
    })?;
    Ok(input)
}

/// Run the check command.
fn run_check(cli: &Cli, config: LintConfig, args: CheckArgs) -> Result<()> {
    tracing::debug!("Running check command with args: {:?}", args);

    let engine = RuleEngine::new(config)?;
    let reports = if args.target.contains("..") {
        engine.check_range(&args.target)?
    } else {
        vec![engine.check_commit(&args.target)?]
    };

    match cli.format {
        Some(OutputFormat::Json) => {
            let json: Vec<_> = reports.iter().map(LintReport::to_json).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        _ => {
            for report in &reports {
                print!("{}", report.render_text(None));
            }
            let problems = reports.iter().any(|r| r.issue_count() > 0);
            if problems {
                let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
                let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();
                println!(
                    "\n{} commits checked: found {} problems, {} warnings",
                    reports.len(),
                    errors,
                    warnings
                );
                if let Some(help) = engine.config().help_url.as_deref() {
                    println!("\nGet help: {}", help.trim());
                }
            }
        }
    }

    finish(&reports, args.strict)
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: LintConfig) -> Result<()> {
    let engine = RuleEngine::new(config)?;

    if cli.format == Some(OutputFormat::Json) {
        let json: Vec<_> = engine
            .rules()
            .iter()
            .map(|(entry, setting)| {
                serde_json::json!({
                    "name": entry.name,
                    "level": u8::from(setting.level),
                    "when": setting.when.as_str(),
                    "value": setting.value,
                    "description": entry.description,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        );
        return Ok(());
    }

    for (entry, setting) in engine.rules() {
        let value = setting
            .value
            .as_ref()
            .map(|v| format!(" {}", v))
            .unwrap_or_default();
        println!(
            "{:<24} {:<8} {}{}",
            console::style(entry.name).bold(),
            setting.level,
            setting.when.as_str(),
            value
        );
        println!("    {}", console::style(entry.description).dim());
    }

    Ok(())
}

/// Run the hooks command.
fn run_hooks(config: &LintConfig, args: HooksArgs) -> Result<()> {
    use crate::hooks::HookManager;

    tracing::debug!("Running hooks command");

    let manager = HookManager::new(config.hooks.args.clone())?;

    match args.action {
        HooksAction::Install { hook, force } => {
            if let Some(hook_name) = hook {
                manager.install_hook(&hook_name, force)?;
                println!("✓ Installed {} hook", hook_name);
            } else {
                manager.install_all(force)?;
                println!("✓ Installed all hooks");
            }
        }
        HooksAction::Uninstall { hook } => {
            if let Some(hook_name) = hook {
                manager.uninstall_hook(&hook_name)?;
                println!("✓ Uninstalled {} hook", hook_name);
            } else {
                manager.uninstall_all()?;
                println!("✓ Uninstalled all hooks");
            }
        }
        HooksAction::Status => {
            for (hook, installed) in manager.status() {
                let icon = if installed { "✓" } else { "✗" };
                println!("{} {}", icon, hook);
            }
        }
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = Path::new("cmlint.toml");

    if config_path.exists() && !args.force {
        return Err(LintError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("✓ Created cmlint.toml");

    Ok(())
}

/// Print the configuration with presets folded into `rules`.
fn run_print_config(config: LintConfig) -> Result<()> {
    let rules = resolve_rules(&config)?;
    let resolved = LintConfig {
        extends: Vec::new(),
        rules,
        ..config
    };

    let rendered = toml::to_string_pretty(&resolved).context("Failed to render configuration")?;
    print!("{}", rendered);

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cmlint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Severity;
    use crate::rules::LintIssue;
    use tempfile::TempDir;

    fn report_with(errors: usize, warnings: usize) -> LintReport {
        let mut report = LintReport::new("x");
        for severity in std::iter::repeat(Severity::Error)
            .take(errors)
            .chain(std::iter::repeat(Severity::Warning).take(warnings))
        {
            report.push(LintIssue {
                rule: "r".to_string(),
                severity,
                message: "m".to_string(),
            });
        }
        report
    }

    #[test]
    fn test_finish() {
        assert!(finish(&[report_with(0, 0)], false).is_ok());
        assert!(finish(&[report_with(0, 2)], false).is_ok());
        assert!(matches!(
            finish(&[report_with(0, 2)], true),
            Err(LintError::Lint {
                errors: 0,
                warnings: 2
            })
        ));
        assert!(matches!(
            finish(&[report_with(1, 0), report_with(2, 1)], false),
            Err(LintError::Lint {
                errors: 3,
                warnings: 1
            })
        ));
    }

    #[test]
    fn test_read_edit_file_strips_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(
            &path,
            "feat: add x\n\nSigned-off-by: A B <a@b.c>\n# Please enter the commit message\n",
        )
        .unwrap();

        let message = read_edit_file(Some(&path)).unwrap();
        assert_eq!(message, "feat: add x\n\nSigned-off-by: A B <a@b.c>");
    }

    #[test]
    fn test_read_edit_file_missing() {
        let dir = TempDir::new().unwrap();
        let result = read_edit_file(Some(&dir.path().join("missing")));
        assert!(matches!(
            result,
            Err(LintError::Message(MessageError::ReadFailed { .. }))
        ));
    }
}
