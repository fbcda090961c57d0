use thiserror::Error;

use super::Buffer;
use crate::markdown::ContinuationDirective;
use crate::surface::{self, Surface};

/// Contract violations of the buffer mutator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("replace range {start}..{end} is out of bounds for buffer of {len} chars")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

/// Replace `[start, end)` of the surface's flattened text with `text` and
/// put the caret at `caret_after`.
///
/// The whole resulting string is assigned back to the surface, which
/// collapses its node fragmentation, then the caret is placed explicitly.
/// This must not run while an input method composition is in progress.
///
/// # Errors
///
/// Returns [`EditError::RangeOutOfBounds`] unless
/// `start <= end <= len`. The surface is left untouched in that case.
pub fn replace<S: Surface + ?Sized>(
    surface: &mut S,
    start: usize,
    end: usize,
    text: &str,
    caret_after: usize,
) -> Result<(), EditError> {
    let mut buffer = Buffer::snapshot(surface);
    let len = buffer.len_chars();
    if start > end || end > len {
        return Err(EditError::RangeOutOfBounds { start, end, len });
    }

    buffer.splice(start, end, text);
    surface.set_text(&buffer.text());
    surface::place_caret(surface, caret_after);
    Ok(())
}

/// Apply a continuation directive through [`replace`].
///
/// # Errors
///
/// See [`replace`].
pub fn apply<S: Surface + ?Sized>(
    surface: &mut S,
    directive: &ContinuationDirective,
) -> Result<(), EditError> {
    replace(
        surface,
        directive.span.start,
        directive.span.end,
        &directive.text,
        directive.caret,
    )
}
