// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git-style cleanup of an edited commit message file.

/// Marker line below which git ignores the message (`commit -v`).
const SCISSORS: &str = "------------------------ >8 ------------------------";

/// Strip what git itself would strip from `COMMIT_EDITMSG`: everything from
/// the scissors line down, and every line starting with the comment char.
pub fn strip_comments(text: &str, comment_char: char) -> String {
    let mut kept = Vec::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(comment_char) {
            if rest.trim() == SCISSORS {
                break;
            }
            continue;
        }
        kept.push(line);
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment_lines() {
        let text = "feat: add x\n\n# Please enter the commit message\n#\nSigned-off-by: A B <a@b.c>\n";
        assert_eq!(
            strip_comments(text, '#'),
            "feat: add x\n\nSigned-off-by: A B <a@b.c>"
        );
    }

    #[test]
    fn test_scissors_cuts_the_rest() {
        let text = "fix: y\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        assert_eq!(strip_comments(text, '#'), "fix: y");
    }

    #[test]
    fn test_other_comment_char() {
        let text = "fix: y\n; note\n#keep";
        assert_eq!(strip_comments(text, ';'), "fix: y\n#keep");
    }
}
