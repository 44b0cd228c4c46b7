// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message model and input cleanup.

pub mod cleanup;
mod message;

pub use cleanup::strip_comments;
pub use message::CommitMessage;
pub(crate) use message::CHERRY_PICK_REGEX;
