//! Line-level editing over a surface's flattened text.
//!
//! Provides a rope-backed buffer snapshot with line context extraction,
//! and the single exclusive-replace path every programmatic edit goes
//! through.

mod buffer;
mod mutator;

pub use buffer::{Buffer, LineContext, line_around};
pub use mutator::{EditError, apply, replace};
