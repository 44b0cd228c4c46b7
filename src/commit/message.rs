// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Conventional commit header: `type(scope)!: subject`.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\w*)(?:\((?P<scope>[^()]*)\))?!?: (?P<subject>.*)$"
    ).unwrap();

    /// A git trailer (`Key: value`, `Refs #12`) or a breaking change note.
    static ref TRAILER_REGEX: Regex = Regex::new(
        r"^(?:BREAKING[ -]CHANGE: .*|[A-Za-z][\w-]*(?:: | #)\S.*)$"
    ).unwrap();

    /// Annotation appended by `git cherry-pick -x`.
    pub(crate) static ref CHERRY_PICK_REGEX: Regex = Regex::new(
        r"^\(cherry picked from commit [0-9a-f]{7,40}\)$"
    ).unwrap();
}

/// Parsed conventional commit header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Header {
    commit_type: Option<String>,
    scope: Option<String>,
    subject: Option<String>,
}

impl Header {
    fn parse(line: &str) -> Self {
        let Some(captures) = HEADER_REGEX.captures(line) else {
            return Self::default();
        };

        let non_empty = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            commit_type: non_empty("type"),
            scope: non_empty("scope"),
            subject: non_empty("subject"),
        }
    }
}

/// A commit message as seen by the rules.
///
/// The lines come from splitting the trimmed raw text on newlines. The
/// message is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    raw: Option<String>,
    lines: Vec<String>,
    header: Header,
    footer_start: Option<usize>,
}

impl CommitMessage {
    /// Build a message from raw text, which may be absent.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let lines: Vec<String> = match raw {
            Some(text) if !text.is_empty() => text
                .trim()
                .split('\n')
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect(),
            _ => Vec::new(),
        };

        let header = lines.first().map(|l| Header::parse(l)).unwrap_or_default();
        let footer_start = find_footer_start(&lines);

        Self {
            raw: raw.map(str::to_string),
            lines,
            header,
            footer_start,
        }
    }

    /// Build a message from raw text.
    pub fn parse(raw: &str) -> Self {
        Self::from_raw(Some(raw))
    }

    /// Whether there is nothing to validate (absent or empty raw text).
    pub fn is_empty(&self) -> bool {
        self.raw.as_deref().map_or(true, str::is_empty)
    }

    /// Lines of the trimmed message.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First line of the trimmed message.
    pub fn header(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    /// First line of the raw, untrimmed text.
    pub fn raw_header(&self) -> &str {
        self.raw
            .as_deref()
            .and_then(|raw| raw.split('\n').next())
            .map(|line| line.trim_end_matches('\r'))
            .unwrap_or("")
    }

    pub fn commit_type(&self) -> Option<&str> {
        self.header.commit_type.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.header.scope.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.header.subject.as_deref()
    }

    /// Lines between the header and the footer, without surrounding blanks.
    pub fn body_lines(&self) -> &[String] {
        if self.lines.len() < 2 {
            return &[];
        }
        let end = self.footer_start.unwrap_or(self.lines.len());
        let mut body = &self.lines[1..end];

        while let [first, rest @ ..] = body {
            if !first.trim().is_empty() {
                break;
            }
            body = rest;
        }
        while let [rest @ .., last] = body {
            if !last.trim().is_empty() {
                break;
            }
            body = rest;
        }
        body
    }

    /// Index of the first footer line, if the message ends in a trailer block.
    pub fn footer_start(&self) -> Option<usize> {
        self.footer_start
    }

    pub fn footer_lines(&self) -> &[String] {
        match self.footer_start {
            Some(start) => &self.lines[start..],
            None => &[],
        }
    }
}

/// Whether a line belongs in a trailer block.
fn is_trailer_line(line: &str) -> bool {
    let line = line.trim();
    TRAILER_REGEX.is_match(line) || CHERRY_PICK_REGEX.is_match(line)
}

/// Find where the trailing block of trailer lines begins.
///
/// Walking up from the last line, trailer lines and blank lines are
/// accepted until the first other line; the header never counts.
fn find_footer_start(lines: &[String]) -> Option<usize> {
    let mut start = None;

    for (index, line) in lines.iter().enumerate().skip(1).rev() {
        if line.trim().is_empty() {
            continue;
        }
        if !is_trailer_line(line) {
            break;
        }
        start = Some(index);
    }

    start
}
