// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit linting.
//!
//! This module provides the built-in rules, a registry to look them up by
//! name, and an engine that evaluates a configured rule table against
//! commit messages.

mod builtin;
mod conventional;
mod engine;
mod report;
mod trailers;

pub use builtin::{find_rule, Evaluate, RuleContext, RuleEntry, RuleOutcome, RULES};
pub use conventional::Case;
pub use engine::RuleEngine;
pub use report::{LintIssue, LintReport};
pub use trailers::{
    check_cherry_pick_position, check_signed_off, CHERRY_PICK_NOT_LAST, SIGNED_OFF_MISSING,
};
