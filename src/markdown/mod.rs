//! Markdown block-prefix continuation.
//!
//! This module handles:
//! - Classifying a line against the block-prefix grammar (fences, quotes,
//!   bullet and ordered lists)
//! - Computing the edit a structural key should make on that line

pub mod continuation;
mod prefix;

pub use continuation::{
    ContinuationDirective, INDENT_WIDTH, commit_line, delete_backward, indent, outdent,
};
pub use prefix::{Fence, LinePrefix, classify};
