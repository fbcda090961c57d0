//! Terminal host and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete host state, owning the editable surface
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transition, with native defaults for keys the
//!   continuation engine declines
//! - [`App::run`]: Main event loop with rendering and autosave

mod effects;
mod event_loop;
mod input;
mod model;
mod render;
mod update;

pub use model::{Direction, Model, ToastLevel};
pub use render::render;
pub use update::{Message, update};

use std::path::PathBuf;

use crate::session::{DEFAULT_AUTOSAVE_MS, HashStore};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    hash: Option<String>,
    tab_indent: bool,
    autosave_ms: u64,
    style: Option<String>,
    store: HashStore,
    download_dir: PathBuf,
}

impl App {
    /// Create an application that persists to the default store.
    pub fn new() -> Self {
        Self {
            hash: None,
            tab_indent: true,
            autosave_ms: DEFAULT_AUTOSAVE_MS,
            style: None,
            store: HashStore::at(HashStore::default_path()),
            download_dir: PathBuf::from("."),
        }
    }

    /// Open the document carried by a share hash instead of the stored one.
    #[must_use]
    pub fn with_hash(mut self, hash: Option<String>) -> Self {
        self.hash = hash;
        self
    }

    /// Enable or disable Tab / Shift+Tab indentation of marker lines.
    #[must_use]
    pub const fn with_tab_indent(mut self, enabled: bool) -> Self {
        self.tab_indent = enabled;
        self
    }

    #[must_use]
    pub const fn with_autosave_delay(mut self, delay_ms: u64) -> Self {
        self.autosave_ms = delay_ms;
        self
    }

    /// Style attribute to apply (and save) on start.
    #[must_use]
    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: HashStore) -> Self {
        self.store = store;
        self
    }

    /// Directory that HTML snapshots are written to.
    #[must_use]
    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = dir;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
