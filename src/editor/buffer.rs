use std::ops::Range;

use ropey::Rope;

use crate::surface::{self, Surface};

/// Snapshot of a surface's flattened text, backed by a rope.
///
/// Offsets are char indices. A snapshot is only valid until the next
/// mutation of the surface it was taken from.
pub struct Buffer {
    rope: Rope,
}

/// The line the caret sits in, computed fresh for one key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    /// Offset of the first char of the line.
    pub line_start: usize,
    /// Exclusive end: the offset of the newline, or the buffer length.
    pub line_end: usize,
    /// Text of `[line_start, line_end)`, never containing a newline.
    pub line_text: String,
    pub caret_offset: usize,
    /// `caret_offset - line_start`.
    pub caret_column: usize,
}

impl LineContext {
    /// Whether the caret sits after the last char of the line.
    pub fn caret_at_line_end(&self) -> bool {
        self.caret_column == self.line_text.chars().count()
    }
}

impl Buffer {
    /// Create a buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Snapshot the flattened text of `surface`.
    pub fn snapshot<S: Surface + ?Sized>(surface: &S) -> Self {
        let mut rope = Rope::new();
        for text in surface.nodes().iter().filter_map(surface::RenderNode::text) {
            let end = rope.len_chars();
            rope.insert(end, text);
        }
        Self { rope }
    }

    /// Length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of a char range. Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(range).to_string()
    }

    /// Line context around `caret`.
    ///
    /// The backward scan starts at `caret - 1`, so a caret sitting right
    /// before a newline belongs to the line that newline terminates.
    /// Returns `None` if `caret` is past the end of the buffer.
    pub fn line_around(&self, caret: usize) -> Option<LineContext> {
        if caret > self.rope.len_chars() {
            return None;
        }

        let mut line_start = caret;
        let mut back = self.rope.chars_at(caret);
        while let Some(ch) = back.prev() {
            if ch == '\n' {
                break;
            }
            line_start -= 1;
        }

        let forward = self
            .rope
            .chars_at(caret)
            .take_while(|&ch| ch != '\n')
            .count();
        let line_end = caret + forward;

        Some(LineContext {
            line_start,
            line_end,
            line_text: self.slice(line_start..line_end),
            caret_offset: caret,
            caret_column: caret - line_start,
        })
    }

    /// Replace `[start, end)` with `text`. The caller checks bounds.
    pub(super) fn splice(&mut self, start: usize, end: usize, text: &str) {
        self.rope.remove(start..end);
        self.rope.insert(start, text);
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field(
                "rope",
                &format_args!(
                    "Rope({} chars, {} lines)",
                    self.rope.len_chars(),
                    self.rope.len_lines()
                ),
            )
            .finish()
    }
}

/// Line context around the caret of `surface`.
///
/// `None` when the surface has no usable caret (no selection, a range
/// selection, or a selection outside the surface).
pub fn line_around<S: Surface + ?Sized>(surface: &S) -> Option<(Buffer, LineContext)> {
    let caret = surface::current_offset(surface)?;
    let buffer = Buffer::snapshot(surface);
    let ctx = buffer.line_around(caret)?;
    Some((buffer, ctx))
}
