// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. session::SessionError)
    clippy::module_name_repetitions
)]

//! # Textarea
//!
//! A plain text editor with markdown-aware line continuation.
//!
//! Textarea edits a plain text surface with:
//! - List, blockquote and ordered list continuation on Enter
//! - One-step marker removal on Backspace
//! - Code fence completion
//! - Tab / Shift+Tab indentation of marker lines
//! - Compressed, shareable document hashes with debounced autosave
//!
//! ## Architecture
//!
//! The core is host neutral. A host owns a [`surface::Surface`] (text split
//! over any number of render nodes, plus a selection) and calls
//! [`input::handle_key`] for each key before its own default action.
//!
//! ## Modules
//!
//! - [`surface`]: Surface abstraction and caret locator
//! - [`editor`]: Buffer snapshot, line context and the single edit path
//! - [`markdown`]: Line prefix classification and continuation decisions
//! - [`input`]: Key events and the structural-key pipeline
//! - [`session`]: Share hashes, autosave, persistence and download
//! - [`app`]: Terminal host (The Elm Architecture)
//! - [`config`]: Flag-file configuration
//! - [`perf`]: Timing scopes and debug event log

pub mod app;
pub mod config;
pub mod editor;
pub mod input;
pub mod markdown;
pub mod perf;
pub mod session;
pub mod surface;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Buffer, EditError, LineContext};
    pub use crate::input::{ContinuationOptions, Key, KeyEvent, KeyOutcome, Modifiers, handle_key};
    pub use crate::session::{EditorSession, HashStore};
    pub use crate::surface::{FragmentedSurface, Surface};
}
