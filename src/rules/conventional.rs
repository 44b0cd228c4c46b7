// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Conventional commit rules.
//!
//! Each rule states a condition that must hold (`always`) or must not hold
//! (`never`). An absent or empty message passes every rule.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::CommitMessage;
use crate::config::Applicability;

use super::builtin::{RuleContext, RuleOutcome};

lazy_static! {
    /// Quoted fragments are ignored by case checks.
    static ref QUOTED_REGEX: Regex = Regex::new(r#"`[^`]*`|"[^"]*"|'[^']*'"#).unwrap();
}

/// Letter case conventions understood by the `*-case` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
    Sentence,
    Start,
    Camel,
    Pascal,
    Kebab,
    Snake,
}

impl Case {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lower-case" | "lowercase" => Some(Case::Lower),
            "upper-case" | "uppercase" => Some(Case::Upper),
            "sentence-case" | "sentencecase" => Some(Case::Sentence),
            "start-case" => Some(Case::Start),
            "camel-case" => Some(Case::Camel),
            "pascal-case" => Some(Case::Pascal),
            "kebab-case" => Some(Case::Kebab),
            "snake-case" => Some(Case::Snake),
            _ => None,
        }
    }

    /// Check whether `text` is written in this case.
    ///
    /// Quoted fragments are removed first; text that ends up empty or starts
    /// with a digit matches every case.
    pub fn matches(self, text: &str) -> bool {
        let stripped = QUOTED_REGEX.replace_all(text, "");
        let input = stripped.trim();

        match input.chars().next() {
            None => return true,
            Some(c) if c.is_ascii_digit() => return true,
            Some(_) => {}
        }

        match self {
            Case::Lower => input == input.to_lowercase(),
            Case::Upper => input == input.to_uppercase(),
            // Only the first character is constrained, so acronyms pass
            Case::Sentence => input.chars().next().map_or(true, |c| !c.is_lowercase()),
            Case::Start => input
                .split_whitespace()
                .all(|word| word.chars().next().map_or(true, |c| !c.is_lowercase())),
            Case::Camel => {
                is_single_word(input) && input.chars().next().map_or(true, |c| !c.is_uppercase())
            }
            Case::Pascal => {
                is_single_word(input) && input.chars().next().map_or(true, |c| !c.is_lowercase())
            }
            Case::Kebab => input
                .chars()
                .all(|c| c == '-' || c.is_lowercase() || c.is_ascii_digit()),
            Case::Snake => input
                .chars()
                .all(|c| c == '_' || c.is_lowercase() || c.is_ascii_digit()),
        }
    }
}

fn is_single_word(input: &str) -> bool {
    input.chars().all(char::is_alphanumeric)
}

fn must(when: Applicability) -> &'static str {
    match when {
        Applicability::Always => "must",
        Applicability::Never => "must not",
    }
}

/// Shared check for `type-case`, `scope-case` and `subject-case`.
fn check_case(field: &str, text: Option<&str>, ctx: &RuleContext<'_>) -> RuleOutcome {
    let (Some(text), Some(value)) = (text, ctx.value) else {
        return RuleOutcome::pass();
    };

    let names = value.as_list();
    let matched = names.iter().any(|name| match Case::from_name(name) {
        Some(case) => case.matches(text),
        None => {
            tracing::warn!("Unknown case '{}' in {}-case rule", name, field);
            false
        }
    });

    RuleOutcome::check(ctx.when.expect(matched), || {
        format!("{} {} be {}", field, must(ctx.when), names.join(", "))
    })
}

pub(super) fn type_enum(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let (Some(commit_type), Some(value)) = (message.commit_type(), ctx.value) else {
        return RuleOutcome::pass();
    };

    let allowed = value.as_list();
    let listed = allowed.contains(&commit_type);

    RuleOutcome::check(ctx.when.expect(listed), || {
        format!(
            "type {} be one of [{}]",
            must(ctx.when),
            allowed.join(", ")
        )
    })
}

pub(super) fn type_case(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    check_case("type", message.commit_type(), ctx)
}

pub(super) fn type_empty(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    if message.is_empty() {
        return RuleOutcome::pass();
    }
    let empty = message.commit_type().is_none();
    RuleOutcome::check(ctx.when.expect(empty), || match ctx.when {
        Applicability::Always => "type must be empty".to_string(),
        Applicability::Never => "type may not be empty".to_string(),
    })
}

pub(super) fn scope_case(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    check_case("scope", message.scope(), ctx)
}

pub(super) fn subject_case(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    // Subjects that do not start with a letter are exempt
    let subject = message
        .subject()
        .filter(|s| s.chars().next().is_some_and(char::is_alphabetic));
    check_case("subject", subject, ctx)
}

pub(super) fn subject_empty(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    if message.is_empty() {
        return RuleOutcome::pass();
    }
    let empty = message.subject().is_none();
    RuleOutcome::check(ctx.when.expect(empty), || match ctx.when {
        Applicability::Always => "subject must be empty".to_string(),
        Applicability::Never => "subject may not be empty".to_string(),
    })
}

pub(super) fn subject_full_stop(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let Some(subject) = message.subject() else {
        return RuleOutcome::pass();
    };
    let stop = ctx.value.and_then(|v| v.as_text()).unwrap_or(".");
    let ends = subject.ends_with(stop);

    RuleOutcome::check(ctx.when.expect(ends), || match ctx.when {
        Applicability::Always => format!("subject must end with full stop '{}'", stop),
        Applicability::Never => format!("subject may not end with full stop '{}'", stop),
    })
}

pub(super) fn header_max_length(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let Some(max) = ctx.value.and_then(|v| v.as_number()) else {
        return RuleOutcome::pass();
    };
    let length = message.header().chars().count();

    RuleOutcome::check(length <= max, || {
        format!(
            "header must not be longer than {} characters, current length is {}",
            max, length
        )
    })
}

pub(super) fn header_trim(message: &CommitMessage, _ctx: &RuleContext<'_>) -> RuleOutcome {
    let header = message.raw_header();
    RuleOutcome::check(header.trim() == header, || {
        "header must not be surrounded by whitespace".to_string()
    })
}

pub(super) fn body_leading_blank(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let lines = message.lines();
    if lines.len() < 2 {
        return RuleOutcome::pass();
    }
    let blank = lines[1].trim().is_empty();

    RuleOutcome::check(ctx.when.expect(blank), || {
        format!("body {} have leading blank line", must(ctx.when))
    })
}

pub(super) fn footer_leading_blank(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let Some(start) = message.footer_start() else {
        return RuleOutcome::pass();
    };
    let blank = message.lines()[start - 1].trim().is_empty();

    RuleOutcome::check(ctx.when.expect(blank), || {
        format!("footer {} have leading blank line", must(ctx.when))
    })
}

/// Lines containing a URL are not length-checked.
fn longest_line(lines: &[String]) -> usize {
    lines
        .iter()
        .filter(|line| !line.contains("://"))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

pub(super) fn body_max_line_length(message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
    let Some(max) = ctx.value.and_then(|v| v.as_number()) else {
        return RuleOutcome::pass();
    };
    RuleOutcome::check(longest_line(message.body_lines()) <= max, || {
        format!("body's lines must not be longer than {} characters", max)
    })
}

pub(super) fn footer_max_line_length(
    message: &CommitMessage,
    ctx: &RuleContext<'_>,
) -> RuleOutcome {
    let Some(max) = ctx.value.and_then(|v| v.as_number()) else {
        return RuleOutcome::pass();
    };
    RuleOutcome::check(longest_line(message.footer_lines()) <= max, || {
        format!("footer's lines must not be longer than {} characters", max)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleValue;

    fn ctx(when: Applicability, value: Option<&RuleValue>) -> RuleContext<'_> {
        RuleContext { when, value }
    }

    fn list(items: &[&str]) -> RuleValue {
        RuleValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_case_matching() {
        assert!(Case::Lower.matches("add new feature"));
        assert!(!Case::Lower.matches("Add new feature"));
        assert!(Case::Sentence.matches("Add new feature"));
        assert!(Case::Sentence.matches("Add New Feature"));
        assert!(!Case::Sentence.matches("add new feature"));
        assert!(Case::Start.matches("Add New Feature"));
        assert!(Case::Upper.matches("ADD FEATURE"));
        assert!(Case::Pascal.matches("AddFeature"));
        assert!(Case::Camel.matches("addFeature"));
        assert!(Case::Kebab.matches("add-feature"));
        assert!(Case::Snake.matches("add_feature"));
        assert!(!Case::Kebab.matches("add_feature"));
        assert!(Case::Sentence.matches("API changes"));
        assert!(Case::Sentence.matches("Use the HTTP client"));
    }

    #[test]
    fn test_case_ignores_quotes_and_digits() {
        assert!(Case::Lower.matches("bump `Serde` to 1.0"));
        assert!(Case::Upper.matches("2fa support"));
        assert!(Case::Lower.matches(""));
    }

    #[test]
    fn test_type_enum() {
        let allowed = list(&["feat", "fix"]);
        let always = ctx(Applicability::Always, Some(&allowed));

        assert!(type_enum(&CommitMessage::parse("feat: x"), &always).passed);
        let outcome = type_enum(&CommitMessage::parse("wip: x"), &always);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.reason.as_deref(),
            Some("type must be one of [feat, fix]")
        );

        let never = ctx(Applicability::Never, Some(&allowed));
        assert!(!type_enum(&CommitMessage::parse("feat: x"), &never).passed);
    }

    #[test]
    fn test_type_and_subject_empty() {
        let never = ctx(Applicability::Never, None);
        let msg = CommitMessage::parse("just some words");
        assert!(!type_empty(&msg, &never).passed);
        assert!(!subject_empty(&msg, &never).passed);

        let msg = CommitMessage::parse("fix: y");
        assert!(type_empty(&msg, &never).passed);
        assert!(subject_empty(&msg, &never).passed);

        assert!(type_empty(&CommitMessage::parse(""), &never).passed);
    }

    #[test]
    fn test_subject_case_never() {
        let cases = list(&["sentence-case", "start-case", "pascal-case", "upper-case"]);
        let never = ctx(Applicability::Never, Some(&cases));

        assert!(subject_case(&CommitMessage::parse("feat: add x"), &never).passed);
        assert!(!subject_case(&CommitMessage::parse("feat: API changes"), &never).passed);
        let outcome = subject_case(&CommitMessage::parse("feat: Add x"), &never);
        assert!(!outcome.passed);
        assert!(outcome.reason.unwrap().starts_with("subject must not be"));
    }

    #[test]
    fn test_subject_case_always() {
        let cases = list(&["lower-case", "sentence-case"]);
        let always = ctx(Applicability::Always, Some(&cases));

        assert!(subject_case(&CommitMessage::parse("feat: add x"), &always).passed);
        assert!(subject_case(&CommitMessage::parse("feat: Add x"), &always).passed);
        assert!(subject_case(&CommitMessage::parse("feat: API changes"), &always).passed);
        assert!(!subject_case(&CommitMessage::parse("feat: aDD x"), &always).passed);
        // Not starting with a letter
        assert!(subject_case(&CommitMessage::parse("feat: #12 FIX"), &always).passed);
    }

    #[test]
    fn test_subject_full_stop() {
        let stop = RuleValue::Text(".".to_string());
        let never = ctx(Applicability::Never, Some(&stop));
        assert!(!subject_full_stop(&CommitMessage::parse("fix: y."), &never).passed);
        assert!(subject_full_stop(&CommitMessage::parse("fix: y"), &never).passed);
    }

    #[test]
    fn test_header_max_length() {
        let max = RuleValue::Number(10);
        let always = ctx(Applicability::Always, Some(&max));
        assert!(header_max_length(&CommitMessage::parse("fix: short"), &always).passed);
        let outcome = header_max_length(&CommitMessage::parse("fix: a bit longer"), &always);
        assert_eq!(
            outcome.reason.as_deref(),
            Some("header must not be longer than 10 characters, current length is 17")
        );
    }

    #[test]
    fn test_header_trim() {
        let always = ctx(Applicability::Always, None);
        assert!(header_trim(&CommitMessage::parse("fix: y\n"), &always).passed);
        assert!(!header_trim(&CommitMessage::parse(" fix: y"), &always).passed);
    }

    #[test]
    fn test_body_leading_blank() {
        let always = ctx(Applicability::Always, None);
        assert!(body_leading_blank(&CommitMessage::parse("fix: y"), &always).passed);
        assert!(body_leading_blank(&CommitMessage::parse("fix: y\n\nbody"), &always).passed);
        let outcome = body_leading_blank(&CommitMessage::parse("fix: y\nbody"), &always);
        assert_eq!(
            outcome.reason.as_deref(),
            Some("body must have leading blank line")
        );
    }

    #[test]
    fn test_footer_leading_blank() {
        let always = ctx(Applicability::Always, None);
        assert!(footer_leading_blank(&CommitMessage::parse("fix: y\n\nbody\n\nRefs #1"), &always).passed);
        assert!(!footer_leading_blank(&CommitMessage::parse("fix: y\n\nbody\nRefs #1"), &always).passed);
    }

    #[test]
    fn test_line_lengths() {
        let max = RuleValue::Number(20);
        let always = ctx(Applicability::Always, Some(&max));
        let long = "x".repeat(30);

        let msg = CommitMessage::parse(&format!("fix: y\n\n{}", long));
        assert!(!body_max_line_length(&msg, &always).passed);
        assert!(footer_max_line_length(&msg, &always).passed);

        let msg = CommitMessage::parse(&format!("fix: y\n\nRefs: {}", long));
        assert!(body_max_line_length(&msg, &always).passed);
        assert!(!footer_max_line_length(&msg, &always).passed);

        let msg = CommitMessage::parse(&format!("fix: y\n\nsee https://example.com/{}", long));
        assert!(body_max_line_length(&msg, &always).passed);
    }
}
