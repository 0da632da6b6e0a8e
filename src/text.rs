//! Text child normalization. JSX's whitespace model means a raw text child
//! is not emitted verbatim; it is discarded, passed through, or collapsed
//! depending on where its newlines fall.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ir::{IRNode, TextNode};

lazy_static! {
    static ref LEADING_NL_WS: Regex = Regex::new(r"^[ \t]*\n[ \t\n]*").unwrap();
    static ref TRAILING_NL_WS: Regex = Regex::new(r"[ \t\n]*\n[ \t]*$").unwrap();
    static ref INTERNAL_NL_RUN: Regex = Regex::new(r"[ \t]*\n[ \t]*").unwrap();
}

/// Returns `None` when the child contributes no IR at all.
pub fn normalize_text(raw: &str) -> Option<IRNode> {
    let is_all_ws = raw.chars().all(|c| c.is_whitespace());

    if is_all_ws {
        return if raw.contains('\n') {
            // Rule 1: pure formatting whitespace between sibling tags.
            None
        } else if raw.is_empty() {
            None
        } else {
            // Rule 2: a bare run of spaces/tabs with no newline is
            // meaningful (e.g. `<span>a</span> <span>b</span>`).
            Some(IRNode::Text(TextNode {
                content: raw.to_string(),
            }))
        };
    }

    // Rule 3: strip leading/trailing whitespace-with-newline, collapse
    // internal `\s*\n\s*` runs to a single space.
    let collapsed = collapse(raw);
    if collapsed.is_empty() {
        None
    } else {
        Some(IRNode::Text(TextNode { content: collapsed }))
    }
}

fn collapse(raw: &str) -> String {
    let mut s = LEADING_NL_WS.replace(raw, "").into_owned();
    s = TRAILING_NL_WS.replace(&s, "").into_owned();
    INTERNAL_NL_RUN.replace_all(&s, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_newline_whitespace_is_discarded() {
        assert_eq!(normalize_text("\n      "), None);
        assert_eq!(normalize_text("\n"), None);
    }

    #[test]
    fn bare_space_run_is_preserved() {
        let node = normalize_text(" ").unwrap();
        match node {
            IRNode::Text(t) => assert_eq!(t.content, " "),
            _ => panic!("expected Text"),
        }
    }

    #[test]
    fn multiline_indented_text_collapses() {
        let raw = "\n        Hello\n      ";
        let node = normalize_text(raw).unwrap();
        match node {
            IRNode::Text(t) => assert_eq!(t.content, "Hello"),
            _ => panic!("expected Text"),
        }
    }

    #[test]
    fn internal_newline_collapses_to_single_space() {
        let raw = "Hello\n        World";
        let node = normalize_text(raw).unwrap();
        match node {
            IRNode::Text(t) => assert_eq!(t.content, "Hello World"),
            _ => panic!("expected Text"),
        }
    }

    #[test]
    fn empty_string_is_discarded() {
        assert_eq!(normalize_text(""), None);
    }
}
