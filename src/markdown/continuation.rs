//! Decisions for structural keys on a classified line.
//!
//! Every function here is pure: it looks at a [`LineContext`] and returns
//! the edit to apply, or `None` to let the host's native behavior run.

use std::ops::Range;

use super::prefix::{LinePrefix, classify};
use crate::editor::LineContext;

/// Width of one indent step for Tab and Shift+Tab on marker lines.
pub const INDENT_WIDTH: usize = 2;

/// One atomic edit: replace `span` with `text`, then put the caret at
/// `caret`. Offsets refer to the buffer snapshot the context came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationDirective {
    pub span: Range<usize>,
    pub text: String,
    pub caret: usize,
}

impl ContinuationDirective {
    fn insert_at(offset: usize, text: String) -> Self {
        let caret = offset + text.chars().count();
        Self {
            span: offset..offset,
            text,
            caret,
        }
    }

    /// Replace the whole line with `indent`, optionally followed by a
    /// newline, leaving the caret after what was written.
    fn strip_marker(ctx: &LineContext, indent: &str, newline: bool) -> Self {
        let mut text = indent.to_string();
        if newline {
            text.push('\n');
        }
        let caret = ctx.line_start + text.chars().count();
        Self {
            span: ctx.line_start..ctx.line_end,
            text,
            caret,
        }
    }
}

/// Decide what a plain line break does on this line.
pub fn commit_line(ctx: &LineContext) -> Option<ContinuationDirective> {
    match classify(&ctx.line_text) {
        LinePrefix::Fence(fence) => {
            let fence = fence.as_str();
            Some(ContinuationDirective {
                span: ctx.line_start..ctx.line_end,
                text: format!("{fence}\n\n{fence}"),
                caret: ctx.line_start + fence.len() + 1,
            })
        }
        LinePrefix::EmptyQuote { indent }
        | LinePrefix::EmptyBullet { indent, .. }
        | LinePrefix::EmptyOrdered { indent, .. } => {
            Some(ContinuationDirective::strip_marker(ctx, indent, true))
        }
        LinePrefix::Quote { indent, .. } => Some(ContinuationDirective::insert_at(
            ctx.caret_offset,
            format!("\n{indent}> "),
        )),
        LinePrefix::Bullet { indent, bullet, .. } => Some(ContinuationDirective::insert_at(
            ctx.caret_offset,
            format!("\n{indent}{bullet} "),
        )),
        LinePrefix::Ordered { indent, digits, .. } => {
            let next = next_number(digits)?;
            Some(ContinuationDirective::insert_at(
                ctx.caret_offset,
                format!("\n{indent}{next}. "),
            ))
        }
        LinePrefix::Plain => None,
    }
}

/// Decide what backward delete does on this line.
///
/// Only an empty marker line with the caret at its end is handled: the
/// marker goes away in one step and the indent stays.
pub fn delete_backward(ctx: &LineContext) -> Option<ContinuationDirective> {
    if !ctx.caret_at_line_end() {
        return None;
    }
    match classify(&ctx.line_text) {
        LinePrefix::EmptyBullet { indent, .. }
        | LinePrefix::EmptyOrdered { indent, .. }
        | LinePrefix::EmptyQuote { indent } => {
            Some(ContinuationDirective::strip_marker(ctx, indent, false))
        }
        _ => None,
    }
}

/// Indent a marker line by [`INDENT_WIDTH`] spaces.
pub fn indent(ctx: &LineContext) -> Option<ContinuationDirective> {
    if !classify(&ctx.line_text).has_marker() {
        return None;
    }
    Some(ContinuationDirective {
        span: ctx.line_start..ctx.line_start,
        text: " ".repeat(INDENT_WIDTH),
        caret: ctx.caret_offset + INDENT_WIDTH,
    })
}

/// Outdent a marker line by up to [`INDENT_WIDTH`] leading spaces.
///
/// A marker line with no leading spaces still yields an (empty) edit so
/// the key stays consumed.
pub fn outdent(ctx: &LineContext) -> Option<ContinuationDirective> {
    if !classify(&ctx.line_text).has_marker() {
        return None;
    }
    let removed = ctx
        .line_text
        .chars()
        .take(INDENT_WIDTH)
        .take_while(|&ch| ch == ' ')
        .count();
    Some(ContinuationDirective {
        span: ctx.line_start..ctx.line_start + removed,
        text: String::new(),
        caret: ctx.line_start + ctx.caret_column.saturating_sub(removed),
    })
}

/// The marker number after `digits`, or `None` if it does not fit.
fn next_number(digits: &str) -> Option<u64> {
    digits.parse::<u64>().ok()?.checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Buffer;

    fn ctx_at_end_of_line(text: &str, line: usize) -> LineContext {
        let offset: usize = text
            .split('\n')
            .take(line + 1)
            .map(|l| l.chars().count() + 1)
            .sum::<usize>()
            - 1;
        Buffer::from_text(text).line_around(offset).unwrap()
    }

    fn ctx_at(text: &str, caret: usize) -> LineContext {
        Buffer::from_text(text).line_around(caret).unwrap()
    }

    /// Apply a directive to `text` the way the mutator would.
    fn apply(text: &str, d: &ContinuationDirective) -> String {
        let mut buf: Vec<char> = text.chars().collect();
        buf.splice(d.span.clone(), d.text.chars());
        buf.into_iter().collect()
    }

    // --- Commit line ---

    #[test]
    fn test_fence_auto_closes() {
        let ctx = ctx_at_end_of_line("```", 0);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply("```", &d), "```\n\n```");
        assert_eq!(d.caret, 4);
    }

    #[test]
    fn test_tilde_fence_on_later_line() {
        let text = "intro\n~~~";
        let ctx = ctx_at_end_of_line(text, 1);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply(text, &d), "intro\n~~~\n\n~~~");
        assert_eq!(d.caret, 6 + 4);
    }

    #[test]
    fn test_bullet_continues_with_same_marker() {
        for (line, marker) in [("- item", "- "), ("* item", "* "), ("  + item", "  + ")] {
            let ctx = ctx_at_end_of_line(line, 0);
            let d = commit_line(&ctx).unwrap();
            let expected = format!("{line}\n{marker}");
            assert_eq!(apply(line, &d), expected);
            assert_eq!(d.caret, expected.chars().count());
        }
    }

    #[test]
    fn test_bullet_continuation_splits_mid_line() {
        let ctx = ctx_at("- one two", 5);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply("- one two", &d), "- one\n-  two");
        assert_eq!(d.caret, 8);
    }

    #[test]
    fn test_empty_bullet_exits_list() {
        let text = "- a\n  - ";
        let ctx = ctx_at_end_of_line(text, 1);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply(text, &d), "- a\n  \n");
        assert_eq!(d.caret, 4 + 2 + 1);
    }

    #[test]
    fn test_ordered_increments() {
        let ctx = ctx_at_end_of_line("3. content", 0);
        let d = commit_line(&ctx).unwrap();
        let once = apply("3. content", &d);
        assert_eq!(once, "3. content\n4. ");

        let ctx = ctx_at(&format!("{once}more"), once.chars().count() + 4);
        let twice_src = format!("{once}more");
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply(&twice_src, &d), "3. content\n4. more\n5. ");
    }

    #[test]
    fn test_ordered_overflow_declines() {
        let line = format!("{}. x", u64::MAX);
        assert!(commit_line(&ctx_at_end_of_line(&line, 0)).is_none());
        let line = "99999999999999999999999. x";
        assert!(commit_line(&ctx_at_end_of_line(line, 0)).is_none());
    }

    #[test]
    fn test_empty_ordered_exits_list() {
        let ctx = ctx_at_end_of_line("1. ", 0);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply("1. ", &d), "\n");
        assert_eq!(d.caret, 1);
    }

    #[test]
    fn test_quote_normalizes_to_marker_and_space() {
        let ctx = ctx_at_end_of_line(">quoted", 0);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply(">quoted", &d), ">quoted\n> ");
    }

    #[test]
    fn test_indented_quote_keeps_indent() {
        let ctx = ctx_at_end_of_line("  > quoted", 0);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply("  > quoted", &d), "  > quoted\n  > ");
    }

    #[test]
    fn test_empty_quote_exits() {
        let ctx = ctx_at_end_of_line("> ", 0);
        let d = commit_line(&ctx).unwrap();
        assert_eq!(apply("> ", &d), "\n");
        assert_eq!(d.caret, 1);
    }

    #[test]
    fn test_plain_line_is_not_intercepted() {
        assert!(commit_line(&ctx_at_end_of_line("hello", 0)).is_none());
        assert!(commit_line(&ctx_at_end_of_line("", 0)).is_none());
        assert!(commit_line(&ctx_at_end_of_line("```rust", 0)).is_none());
    }

    // --- Backward delete ---

    #[test]
    fn test_backspace_strips_empty_quote_keeping_indent() {
        let text = "x\n  > ";
        let ctx = ctx_at_end_of_line(text, 1);
        let d = delete_backward(&ctx).unwrap();
        assert_eq!(apply(text, &d), "x\n  ");
        assert_eq!(d.caret, 4);
    }

    #[test]
    fn test_backspace_strips_empty_bullet_and_ordered() {
        let d = delete_backward(&ctx_at_end_of_line("- ", 0)).unwrap();
        assert_eq!(apply("- ", &d), "");
        assert_eq!(d.caret, 0);

        let d = delete_backward(&ctx_at_end_of_line("\t12. ", 0)).unwrap();
        assert_eq!(apply("\t12. ", &d), "\t");
        assert_eq!(d.caret, 1);
    }

    #[test]
    fn test_backspace_requires_caret_at_line_end() {
        assert!(delete_backward(&ctx_at("- ", 1)).is_none());
    }

    #[test]
    fn test_backspace_on_content_line_is_native() {
        assert!(delete_backward(&ctx_at_end_of_line("- item", 0)).is_none());
        assert!(delete_backward(&ctx_at_end_of_line("plain", 0)).is_none());
    }

    // --- Indent / outdent ---

    #[test]
    fn test_indent_prepends_two_spaces() {
        let text = "a\n- item";
        let ctx = ctx_at(text, 5);
        let d = indent(&ctx).unwrap();
        assert_eq!(apply(text, &d), "a\n  - item");
        assert_eq!(d.caret, 7);
    }

    #[test]
    fn test_indent_ignores_plain_lines() {
        assert!(indent(&ctx_at("plain", 2)).is_none());
        assert!(outdent(&ctx_at("plain", 2)).is_none());
    }

    #[test]
    fn test_outdent_removes_up_to_two_spaces() {
        let d = outdent(&ctx_at("    1. x", 8)).unwrap();
        assert_eq!(apply("    1. x", &d), "  1. x");
        assert_eq!(d.caret, 6);

        let d = outdent(&ctx_at(" > q", 4)).unwrap();
        assert_eq!(apply(" > q", &d), "> q");
        assert_eq!(d.caret, 3);
    }

    #[test]
    fn test_outdent_clamps_caret_to_line_start() {
        let d = outdent(&ctx_at("  - x", 1)).unwrap();
        assert_eq!(d.caret, 0);
    }

    #[test]
    fn test_outdent_without_indent_is_empty_edit() {
        let d = outdent(&ctx_at("- x", 3)).unwrap();
        assert_eq!(d.span, 0..0);
        assert!(d.text.is_empty());
        assert_eq!(d.caret, 3);
    }

    #[test]
    fn test_outdent_leaves_tabs_alone() {
        let d = outdent(&ctx_at("\t- x", 4)).unwrap();
        assert_eq!(d.span, 0..0);
    }
}
