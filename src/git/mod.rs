// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Read-only access to commit messages and repository paths.

mod repo;

pub use repo::{open_repo, Repository};
