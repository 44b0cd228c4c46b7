// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Trailer rules: sign-off presence and cherry-pick annotation position.
//!
//! Both rules only look at lines, never at the conventional header, and
//! both treat an absent or empty message as nothing to validate.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::{CommitMessage, CHERRY_PICK_REGEX};

use super::builtin::{RuleContext, RuleOutcome};

lazy_static! {
    /// `Signed-off-by: Name <email>` with no nested angle brackets.
    static ref SIGNED_OFF_REGEX: Regex = Regex::new(r"^Signed-off-by:\s.+\s<[^<>]+>$").unwrap();
}

pub const SIGNED_OFF_MISSING: &str = "Signed-off-by: is missing in the commit message";
pub const CHERRY_PICK_NOT_LAST: &str =
    "Cherry-pick line must be the last one in the commit message";

/// Pass if any line is a sign-off trailer.
pub fn check_signed_off(message: &CommitMessage) -> RuleOutcome {
    if message.is_empty() {
        return RuleOutcome::pass();
    }

    let found = message
        .lines()
        .iter()
        .any(|line| SIGNED_OFF_REGEX.is_match(line.trim()));

    if found {
        RuleOutcome::pass()
    } else {
        RuleOutcome::fail(SIGNED_OFF_MISSING)
    }
}

/// Pass unless the first cherry-pick annotation is followed by other lines.
///
/// `git cherry-pick -x` appends the annotation as the final line, so content
/// after it means the message was edited by hand.
pub fn check_cherry_pick_position(message: &CommitMessage) -> RuleOutcome {
    if message.is_empty() {
        return RuleOutcome::pass();
    }

    let lines = message.lines();
    let Some(index) = lines
        .iter()
        .position(|line| CHERRY_PICK_REGEX.is_match(line.trim()))
    else {
        return RuleOutcome::pass();
    };

    if index + 1 == lines.len() {
        RuleOutcome::pass()
    } else {
        tracing::trace!(
            "cherry-pick annotation at line {} of {}",
            index + 1,
            lines.len()
        );
        RuleOutcome::fail(CHERRY_PICK_NOT_LAST)
    }
}

pub(super) fn signed_off_anywhere(message: &CommitMessage, _ctx: &RuleContext<'_>) -> RuleOutcome {
    check_signed_off(message)
}

pub(super) fn cherry_pick_at_end(message: &CommitMessage, _ctx: &RuleContext<'_>) -> RuleOutcome {
    check_cherry_pick_position(message)
}
