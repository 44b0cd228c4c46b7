// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Presets and default configuration values.

use std::collections::BTreeMap;

use super::schema::{Applicability, RuleSetting, RuleValue, Severity};

/// Name of the conventional-commit base rule set.
pub const CONVENTIONAL_PRESET: &str = "conventional";

/// Help text shown after a report with problems.
pub const DEFAULT_HELP_URL: &str = "\
Commit messages must follow conventional commit format:
https://www.conventionalcommits.org/en/v1.0.0/#summary
    type(optional-scope): subject

    [optional body]
* To bypass commit hooks run 'git commit --no-verify'";

/// Commit types accepted by the conventional preset.
pub const CONVENTIONAL_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

fn setting(level: Severity, when: Applicability) -> RuleSetting {
    RuleSetting::new(level, when)
}

fn list(items: &[&str]) -> RuleValue {
    RuleValue::List(items.iter().map(|s| s.to_string()).collect())
}

/// Rules of the conventional preset.
pub fn conventional_rules() -> BTreeMap<String, RuleSetting> {
    use Applicability::{Always, Never};
    use Severity::{Error, Warning};

    let rules = [
        ("body-leading-blank", setting(Warning, Always)),
        (
            "body-max-line-length",
            setting(Error, Always).with_value(RuleValue::Number(100)),
        ),
        ("footer-leading-blank", setting(Warning, Always)),
        (
            "footer-max-line-length",
            setting(Error, Always).with_value(RuleValue::Number(100)),
        ),
        (
            "header-max-length",
            setting(Error, Always).with_value(RuleValue::Number(100)),
        ),
        ("header-trim", setting(Error, Always)),
        (
            "subject-case",
            setting(Error, Never).with_value(list(&[
                "sentence-case",
                "start-case",
                "pascal-case",
                "upper-case",
            ])),
        ),
        ("subject-empty", setting(Error, Never)),
        (
            "subject-full-stop",
            setting(Error, Never).with_value(RuleValue::Text(".".to_string())),
        ),
        (
            "type-case",
            setting(Error, Always).with_value(RuleValue::Text("lower-case".to_string())),
        ),
        ("type-empty", setting(Error, Never)),
        (
            "type-enum",
            setting(Error, Always).with_value(list(CONVENTIONAL_TYPES)),
        ),
    ];

    rules
        .into_iter()
        .map(|(name, setting)| (name.to_string(), setting))
        .collect()
}

/// Project rules layered on top of the conventional preset.
pub fn canonical_rules() -> BTreeMap<String, RuleSetting> {
    use Applicability::Always;
    use Severity::{Error, Warning};

    let rules = [
        (
            "body-max-line-length",
            setting(Warning, Always).with_value(RuleValue::Number(100)),
        ),
        (
            "subject-case",
            setting(Warning, Always).with_value(list(&["lower-case", "sentence-case"])),
        ),
        ("signed-off-anywhere", setting(Error, Always)),
        ("cherry-pick-at-end", setting(Error, Always)),
        ("body-leading-blank", setting(Error, Always)),
    ];

    rules
        .into_iter()
        .map(|(name, setting)| (name.to_string(), setting))
        .collect()
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<BTreeMap<String, RuleSetting>> {
    match name {
        CONVENTIONAL_PRESET => Some(conventional_rules()),
        _ => None,
    }
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# cmlint configuration
# Author: Eshan Roy
# SPDX-License-Identifier: MIT

# Base rule sets applied before [rules]
extends = ["conventional"]

# Printed after a report with problems
help_url = """
Commit messages must follow conventional commit format:
https://www.conventionalcommits.org/en/v1.0.0/#summary
    type(optional-scope): subject

    [optional body]
* To bypass commit hooks run 'git commit --no-verify'"""

# Messages matching any of these regexes are not linted
ignores = []

# Skip merge, revert and fixup commits
default_ignores = true

# [level, applicability, value]
#   level: 0 = off, 1 = warning, 2 = error
#   applicability: "always" or "never"
[rules]
body-max-line-length = [1, "always", 100]
subject-case = [1, "always", ["lower-case", "sentence-case"]]
signed-off-anywhere = [2, "always"]
cherry-pick-at-end = [2, "always"]
body-leading-blank = [2, "always"]

[hooks]
args = []

[ui]
color = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LintConfig;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert_eq!(config.rules["signed-off-anywhere"].level, Severity::Error);
        assert_eq!(config.rules["body-max-line-length"].level, Severity::Warning);
    }

    #[test]
    fn test_example_config_matches_default() {
        let example = example_config();
        let config: LintConfig = toml::from_str(example).expect("Example config should parse");
        let default = LintConfig::default();
        assert_eq!(config.extends, default.extends);
        assert_eq!(config.rules, default.rules);
        assert_eq!(
            config.help_url.as_deref().map(str::trim),
            Some(DEFAULT_HELP_URL)
        );
    }

    #[test]
    fn test_conventional_preset() {
        let rules = preset("conventional").unwrap();
        assert_eq!(rules.len(), 12);
        assert_eq!(rules["subject-case"].when, Applicability::Never);
        assert!(preset("angular").is_none());
    }
}
