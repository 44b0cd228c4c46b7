// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in rule registry.
//!
//! The rule set is closed and known at build time: [`RULES`] is a plain
//! list of named entries, each pointing at a pure evaluation function.

use crate::commit::CommitMessage;
use crate::config::{Applicability, RuleValue};

use super::{conventional, trailers};

/// Result of evaluating one rule against one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub passed: bool,
    pub reason: Option<String>,
}

impl RuleOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: Some(reason.into()),
        }
    }

    /// Pass if `condition` holds, otherwise fail with the lazily built reason.
    pub fn check(condition: bool, reason: impl FnOnce() -> String) -> Self {
        if condition {
            Self::pass()
        } else {
            Self::fail(reason())
        }
    }
}

/// Configured arguments handed to a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub when: Applicability,
    pub value: Option<&'a RuleValue>,
}

/// Signature shared by every rule.
pub type Evaluate = fn(&CommitMessage, &RuleContext<'_>) -> RuleOutcome;

/// A named rule.
#[derive(Clone, Copy)]
pub struct RuleEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub evaluate: Evaluate,
}

impl RuleEntry {
    pub fn evaluate(&self, message: &CommitMessage, ctx: &RuleContext<'_>) -> RuleOutcome {
        (self.evaluate)(message, ctx)
    }
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry").field("name", &self.name).finish()
    }
}

/// Every rule cmlint knows, sorted by name.
pub const RULES: &[RuleEntry] = &[
    RuleEntry {
        name: "body-leading-blank",
        description: "a body is separated from the header by a blank line",
        evaluate: conventional::body_leading_blank,
    },
    RuleEntry {
        name: "body-max-line-length",
        description: "body lines are at most N characters",
        evaluate: conventional::body_max_line_length,
    },
    RuleEntry {
        name: "cherry-pick-at-end",
        description: "a cherry-pick annotation is the last line",
        evaluate: trailers::cherry_pick_at_end,
    },
    RuleEntry {
        name: "footer-leading-blank",
        description: "a footer is preceded by a blank line",
        evaluate: conventional::footer_leading_blank,
    },
    RuleEntry {
        name: "footer-max-line-length",
        description: "footer lines are at most N characters",
        evaluate: conventional::footer_max_line_length,
    },
    RuleEntry {
        name: "header-max-length",
        description: "the header is at most N characters",
        evaluate: conventional::header_max_length,
    },
    RuleEntry {
        name: "header-trim",
        description: "the header has no surrounding whitespace",
        evaluate: conventional::header_trim,
    },
    RuleEntry {
        name: "scope-case",
        description: "the scope is written in the given case",
        evaluate: conventional::scope_case,
    },
    RuleEntry {
        name: "signed-off-anywhere",
        description: "a Signed-off-by trailer is present",
        evaluate: trailers::signed_off_anywhere,
    },
    RuleEntry {
        name: "subject-case",
        description: "the subject is written in the given case",
        evaluate: conventional::subject_case,
    },
    RuleEntry {
        name: "subject-empty",
        description: "the subject is empty",
        evaluate: conventional::subject_empty,
    },
    RuleEntry {
        name: "subject-full-stop",
        description: "the subject ends with the given character",
        evaluate: conventional::subject_full_stop,
    },
    RuleEntry {
        name: "type-case",
        description: "the type is written in the given case",
        evaluate: conventional::type_case,
    },
    RuleEntry {
        name: "type-empty",
        description: "the type is empty",
        evaluate: conventional::type_empty,
    },
    RuleEntry {
        name: "type-enum",
        description: "the type is one of the given values",
        evaluate: conventional::type_enum,
    },
];

/// Look up a rule by name.
pub fn find_rule(name: &str) -> Option<&'static RuleEntry> {
    RULES.iter().find(|rule| rule.name == name)
}
