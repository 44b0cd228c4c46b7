// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook script templates.

use handlebars::Handlebars;

use crate::error::{HookError, LintError, Result};

/// Marker line identifying hooks written by cmlint.
pub const HOOK_MARKER: &str = "# cmlint git hook";

const COMMIT_MSG_TEMPLATE: &str = r#"#!/bin/sh
{{marker}}
# Generated by cmlint {{version}}. Remove with `cmlint hooks uninstall`.

if ! command -v {{binary}} >/dev/null 2>&1; then
    echo "{{binary}} not found in PATH, skipping commit message lint" >&2
    exit 0
fi

exec {{binary}} lint --edit "$1"{{extra_args}}
"#;

/// Hooks cmlint can install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookTemplate {
    CommitMsg,
}

impl HookTemplate {
    pub fn all() -> &'static [HookTemplate] {
        &[HookTemplate::CommitMsg]
    }

    /// File name inside the hooks directory.
    pub fn filename(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => "commit-msg",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            HookTemplate::CommitMsg => COMMIT_MSG_TEMPLATE,
        }
    }

    /// Render the hook script, appending `args` to the lint command.
    pub fn render(&self, args: &[String]) -> Result<String> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        let extra_args: String = args.iter().map(|arg| format!(" {}", shell_quote(arg))).collect();
        let data = serde_json::json!({
            "marker": HOOK_MARKER,
            "version": crate::version::VERSION,
            "binary": "cmlint",
            "extra_args": extra_args,
        });

        registry.render_template(self.source(), &data).map_err(|e| {
            LintError::Hook(HookError::RenderFailed {
                hook: self.filename().to_string(),
                message: e.to_string(),
            })
        })
    }
}

impl std::str::FromStr for HookTemplate {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "commit-msg" | "commit_msg" => Ok(HookTemplate::CommitMsg),
            _ => Err(()),
        }
    }
}

/// Quote an argument for a POSIX shell unless it is obviously safe.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./,:@".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_commit_msg() {
        let script = HookTemplate::CommitMsg.render(&[]).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(HOOK_MARKER));
        assert!(script.contains("exec cmlint lint --edit \"$1\"\n"));
    }

    #[test]
    fn test_render_with_args() {
        let args = vec!["--strict".to_string(), "it's".to_string()];
        let script = HookTemplate::CommitMsg.render(&args).unwrap();
        assert!(script.contains(r#"lint --edit "$1" --strict 'it'\''s'"#));
    }

    #[test]
    fn test_parse_hook_name() {
        assert_eq!("commit-msg".parse::<HookTemplate>(), Ok(HookTemplate::CommitMsg));
        assert!("pre-push".parse::<HookTemplate>().is_err());
    }
}
