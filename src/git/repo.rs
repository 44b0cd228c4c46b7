// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, LintError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with the reads cmlint needs.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            LintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                LintError::Git(GitError::NotARepository)
            } else {
                LintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Path of the message file git hands to the commit-msg hook.
    pub fn commit_editmsg_path(&self) -> PathBuf {
        self.git_dir().join("COMMIT_EDITMSG")
    }

    /// Directory git runs hooks from: `core.hooksPath` if set, otherwise
    /// `.git/hooks`.
    pub fn hooks_dir(&self) -> PathBuf {
        let configured = self
            .inner
            .config()
            .and_then(|config| config.get_path("core.hooksPath"))
            .ok();

        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => self
                .inner
                .workdir()
                .unwrap_or_else(|| self.git_dir())
                .join(path),
            None => self.git_dir().join("hooks"),
        }
    }

    /// The configured `core.commentChar`, `#` by default.
    pub fn comment_char(&self) -> char {
        self.inner
            .config()
            .and_then(|config| config.get_string("core.commentChar"))
            .ok()
            .and_then(|value| value.chars().next())
            .filter(|c| !c.is_whitespace())
            .unwrap_or('#')
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the SHA and message of a commit.
    pub fn get_commit_message(&self, reference: &str) -> Result<(String, String)> {
        let commit = self.get_commit(reference)?;
        let message = commit.message().ok_or_else(|| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;
        Ok((commit.id().to_string(), message.to_string()))
    }

    /// Get the SHA and message of every commit in a range, newest first.
    ///
    /// `a..b` yields commits reachable from `b` but not `a`; `a...b` yields
    /// commits reachable from either side but not from their merge base. An
    /// empty side means `HEAD`. A plain reference yields just that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(String, String)>> {
        let (from, to, symmetric) = match range.split_once("...") {
            Some((from, to)) => (from, to, true),
            None => match range.split_once("..") {
                Some((from, to)) => (from, to, false),
                None => return Ok(vec![self.get_commit_message(range)?]),
            },
        };
        let from = if from.is_empty() { "HEAD" } else { from };
        let to = if to.is_empty() { "HEAD" } else { to };

        let walk_error = |command: &str, e: git2::Error| {
            LintError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_error("revwalk", e))?;
        let from = self.get_commit(from)?.id();
        let to = self.get_commit(to)?.id();
        revwalk
            .push(to)
            .map_err(|e| walk_error("revwalk.push", e))?;

        if symmetric {
            revwalk
                .push(from)
                .map_err(|e| walk_error("revwalk.push", e))?;
            match self.inner.merge_base(from, to) {
                Ok(base) => revwalk
                    .hide(base)
                    .map_err(|e| walk_error("revwalk.hide", e))?,
                // Unrelated histories share nothing to hide
                Err(e) if e.code() == git2::ErrorCode::NotFound => {}
                Err(e) => return Err(walk_error("merge-base", e)),
            }
        } else {
            revwalk
                .hide(from)
                .map_err(|e| walk_error("revwalk.hide", e))?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| walk_error("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                LintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid.to_string(), commit.message().unwrap_or("").to_string()));
        }

        Ok(commits)
    }
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}
