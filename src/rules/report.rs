// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint report types and rendering.

use crate::cli::args::OutputFormat;
use crate::config::Severity;
use console::style;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Name of the rule that failed.
    pub rule: String,
    /// Configured severity of the rule.
    pub severity: Severity,
    /// Human-readable reason.
    pub message: String,
}

impl LintIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the issue for terminal output.
    pub fn format(&self) -> String {
        let prefix = if self.is_error() {
            style("✖").red().bold()
        } else {
            style("⚠").yellow().bold()
        };

        format!(
            "{}   {} {}",
            prefix,
            self.message,
            style(format!("[{}]", self.rule)).dim()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.rule,
            "level": u8::from(self.severity),
            "message": self.message,
        })
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone)]
pub struct LintReport {
    /// The message as it was linted.
    pub input: String,
    /// Commit SHA if linting an existing commit.
    pub commit_sha: Option<String>,
    /// Whether the message matched an ignore pattern and was skipped.
    pub ignored: bool,
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            commit_sha: None,
            ignored: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record an issue under errors or warnings according to its severity.
    pub fn push(&mut self, issue: LintIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Disabled => {}
        }
    }

    /// Check if the lint passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>, help_url: Option<&str>) {
        match format {
            Some(OutputFormat::Json) => println!(
                "{}",
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
            ),
            _ => print!("{}", self.render_text(help_url)),
        }
    }

    /// Render the report as terminal text.
    pub fn render_text(&self, help_url: Option<&str>) -> String {
        let mut out = String::new();
        let first_line = self.input.lines().next().unwrap_or("");

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                let status = if self.ignored {
                    style("-").dim()
                } else if self.is_valid() {
                    style("✓").green().bold()
                } else {
                    style("✖").red().bold()
                };
                out.push_str(&format!("{} {} {}\n", status, style(short_sha).cyan(), first_line));
            }
            None => {
                out.push_str(&format!("{}   input: {}\n", style("⧗").dim(), first_line));
            }
        }

        if self.ignored {
            out.push_str(&format!("    {}\n", style("ignored").dim()));
            return out;
        }

        for issue in self.errors.iter().chain(&self.warnings) {
            out.push_str(&format!("{}\n", issue.format()));
        }

        if self.issue_count() > 0 {
            out.push_str(&format!("\n{}\n", self.summary()));
            if let Some(help) = help_url {
                out.push_str(&format!("\n{}   Get help: {}\n", style("ⓘ").blue(), help.trim()));
            }
        }

        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "commit": self.commit_sha,
            "input": self.input,
            "errors": self.errors.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(LintIssue::to_json).collect::<Vec<_>>(),
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "found {} problems, {} warnings",
            self.errors.len(),
            self.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(rule: &str, severity: Severity) -> LintIssue {
        LintIssue {
            rule: rule.to_string(),
            severity,
            message: format!("{} failed", rule),
        }
    }

    #[test]
    fn test_report_valid() {
        let report = LintReport::new("feat: test");
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
        assert!(!report.render_text(Some("help")).contains("help"));
    }

    #[test]
    fn test_push_by_severity() {
        let mut report = LintReport::new("x");
        report.push(issue("a", Severity::Error));
        report.push(issue("b", Severity::Warning));
        report.push(issue("c", Severity::Disabled));

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.summary(), "found 1 problems, 1 warnings");
    }

    #[test]
    fn test_render_text() {
        console::set_colors_enabled(false);
        let mut report = LintReport::new("fix: y\n\nbody");
        report.push(issue("signed-off-anywhere", Severity::Error));

        let text = report.render_text(Some("see docs"));
        assert!(text.contains("input: fix: y"));
        assert!(text.contains("signed-off-anywhere failed [signed-off-anywhere]"));
        assert!(text.contains("found 1 problems, 0 warnings"));
        assert!(text.contains("Get help: see docs"));
    }

    #[test]
    fn test_render_ignored_commit() {
        let mut report = LintReport::new("Merge branch 'x'");
        report.commit_sha = Some("0123456789abcdef".to_string());
        report.ignored = true;

        let text = report.render_text(None);
        assert!(text.contains("0123456"));
        assert!(text.contains("ignored"));
    }

    #[test]
    fn test_json() {
        let mut report = LintReport::new("fix: y");
        report.push(issue("type-enum", Severity::Warning));

        let json = report.to_json();
        assert_eq!(json["valid"], true);
        assert_eq!(json["warnings"][0]["rule"], "type-enum");
        assert_eq!(json["warnings"][0]["level"], 1);
    }
}
