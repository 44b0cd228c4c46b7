// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit message linting.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::CommitMessage;
use crate::config::{resolve_rules, LintConfig, RuleSetting, Severity};
use crate::error::{ConfigError, LintError, Result};
use crate::git;

use super::builtin::{find_rule, RuleContext, RuleEntry};
use super::report::{LintIssue, LintReport};

lazy_static! {
    /// Messages produced by git or forges that are never linted.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"(?m)^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?)))(?:\r?\n)*$)",
        r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)!",
        r"^(Merged (.*?)(in|into) (.*)|Merged PR (.*): (.*))",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
        r"^v?\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\r?\n)*$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Rule engine for linting commit messages.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: LintConfig,
    rules: Vec<(&'static RuleEntry, RuleSetting)>,
    ignores: Vec<Regex>,
}

impl RuleEngine {
    /// Create a rule engine from a configuration.
    ///
    /// Fails on unknown presets, unknown rule names and invalid ignore
    /// patterns. Disabled rules are dropped here.
    pub fn new(config: LintConfig) -> Result<Self> {
        let resolved = resolve_rules(&config)?;

        let unknown: Vec<&str> = resolved
            .keys()
            .filter(|name| find_rule(name).is_none())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(LintError::Config(ConfigError::UnknownRules {
                names: unknown.join(", "),
            }));
        }

        let rules = resolved
            .into_iter()
            .filter(|(_, setting)| setting.level != Severity::Disabled)
            .filter_map(|(name, setting)| find_rule(&name).map(|entry| (entry, setting)))
            .collect::<Vec<_>>();

        let ignores = config
            .ignores
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    LintError::Config(ConfigError::InvalidIgnore {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Rule engine ready with {} enabled rules", rules.len());

        Ok(Self {
            config,
            rules,
            ignores,
        })
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Enabled rules with their settings, ordered by name.
    pub fn rules(&self) -> &[(&'static RuleEntry, RuleSetting)] {
        &self.rules
    }

    /// Whether a message is skipped by an ignore pattern.
    pub fn is_ignored(&self, raw: &str) -> bool {
        let defaults: &[Regex] = if self.config.default_ignores {
            DEFAULT_IGNORES.as_slice()
        } else {
            &[]
        };

        defaults
            .iter()
            .chain(&self.ignores)
            .any(|pattern| pattern.is_match(raw))
    }

    /// Lint a commit message.
    pub fn lint(&self, raw: &str) -> LintReport {
        let mut report = LintReport::new(raw);

        if self.is_ignored(raw) {
            tracing::debug!("Message ignored: {:?}", raw.lines().next().unwrap_or(""));
            report.ignored = true;
            return report;
        }

        let message = CommitMessage::parse(raw);
        self.apply(&message, &mut report);
        report
    }

    fn apply(&self, message: &CommitMessage, report: &mut LintReport) {
        for (entry, setting) in &self.rules {
            let ctx = RuleContext {
                when: setting.when,
                value: setting.value.as_ref(),
            };
            let outcome = entry.evaluate(message, &ctx);

            if !outcome.passed {
                tracing::debug!("Rule {} failed ({})", entry.name, setting.level);
                report.push(LintIssue {
                    rule: entry.name.to_string(),
                    severity: setting.level,
                    message: outcome
                        .reason
                        .unwrap_or_else(|| format!("{} failed", entry.name)),
                });
            }
        }
    }

    /// Lint a specific commit by reference.
    pub fn check_commit(&self, reference: &str) -> Result<LintReport> {
        let repo = git::open_repo()?;
        let (sha, message) = repo.get_commit_message(reference)?;
        let mut report = self.lint(&message);
        report.commit_sha = Some(sha);
        Ok(report)
    }

    /// Lint every commit in a range (`from..to`).
    pub fn check_range(&self, range: &str) -> Result<Vec<LintReport>> {
        let repo = git::open_repo()?;
        let commits = repo.get_commits_in_range(range)?;
        tracing::debug!("Checking {} commits in {}", commits.len(), range);

        Ok(commits
            .into_iter()
            .map(|(sha, message)| {
                let mut report = self.lint(&message);
                report.commit_sha = Some(sha);
                report
            })
            .collect())
    }
}
