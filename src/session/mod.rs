//! Editor session: everything around the core that persists and shares
//! the document.
//!
//! This module handles:
//! - Encoding content and style into a compressed share hash and back
//! - Loading and saving through a persisted hash slot
//! - Debounced autosave
//! - Title extraction, share links and HTML snapshot download
//!
//! It only talks to the surface through plain get/set of the content and
//! the style attribute.

mod autosave;
pub mod codec;
pub mod export;
mod storage;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub use autosave::{AutosaveDebouncer, DEFAULT_AUTOSAVE_MS};
pub use storage::HashStore;

use crate::surface::Surface;

/// Separates content from the style attribute inside a share hash. Never
/// part of the content itself.
pub const RESERVED_SEPARATOR: char = '\0';

/// Title used when the content has no leading heading.
pub const DEFAULT_TITLE: &str = "Textarea";

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\n*#(.+)\n").expect("valid title regex"));

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("content contains the reserved separator character U+0000")]
    ReservedCharacter,
    #[error("invalid share hash encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session store: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content plus style attribute, as carried by a share hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub content: String,
    pub style: Option<String>,
}

/// Encode a document into a share hash (`#` + compressed payload).
///
/// # Errors
///
/// Returns [`SessionError::ReservedCharacter`] if `content` contains the
/// separator, since it could not be decoded back unchanged.
pub fn encode_state(content: &str, style: Option<&str>) -> Result<String, SessionError> {
    if content.contains(RESERVED_SEPARATOR) {
        return Err(SessionError::ReservedCharacter);
    }
    let mut payload = content.to_string();
    if let Some(style) = style {
        payload.push(RESERVED_SEPARATOR);
        payload.push_str(style);
    }
    Ok(format!("#{}", codec::compress(&payload)?))
}

/// Decode a share hash. The leading `#` is optional.
///
/// Returns `Ok(None)` for an empty hash.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64url deflate data.
pub fn decode_state(hash: &str) -> Result<Option<DocumentState>, SessionError> {
    let body = hash.strip_prefix('#').unwrap_or(hash);
    if body.is_empty() {
        return Ok(None);
    }
    let payload = codec::decompress(body)?;
    let mut parts = payload.split(RESERVED_SEPARATOR);
    let content = parts.next().unwrap_or_default().to_string();
    let style = parts
        .next()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);
    Ok(Some(DocumentState { content, style }))
}

/// Document title: the first line when it is a `#` heading.
pub fn title_of(content: &str) -> String {
    TITLE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

/// Links that carry the current document to the companion views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub qr: String,
    pub markdown: String,
}

pub fn share_links(hash: &str) -> ShareLinks {
    ShareLinks {
        qr: format!("/qr?from=edit{hash}"),
        markdown: format!("/md{hash}"),
    }
}

/// Current hash of `surface`'s content and style.
///
/// # Errors
///
/// See [`encode_state`].
pub fn get<S: Surface + ?Sized>(surface: &S) -> Result<String, SessionError> {
    encode_state(&surface.text(), surface.style())
}

/// Replace `surface`'s content and style from `hash`. An empty hash leaves
/// the surface alone.
///
/// # Errors
///
/// See [`decode_state`]. The surface is untouched on error.
pub fn set<S: Surface + ?Sized>(surface: &mut S, hash: &str) -> Result<(), SessionError> {
    if let Some(state) = decode_state(hash)? {
        surface.set_text(&state.content);
        surface.set_style(state.style);
    }
    Ok(())
}

/// Persistence, sharing and autosave for one surface.
#[derive(Debug)]
pub struct EditorSession {
    store: HashStore,
    current_hash: String,
    title: String,
    autosave: AutosaveDebouncer,
    download_dir: PathBuf,
}

impl EditorSession {
    pub fn new(store: HashStore) -> Self {
        Self {
            store,
            current_hash: String::new(),
            title: DEFAULT_TITLE.to_string(),
            autosave: AutosaveDebouncer::default(),
            download_dir: PathBuf::from("."),
        }
    }

    #[must_use]
    pub const fn with_autosave_delay(mut self, delay_ms: u64) -> Self {
        self.autosave = AutosaveDebouncer::new(delay_ms);
        self
    }

    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// The hash the document is currently shared under (empty if none).
    pub fn current_hash(&self) -> &str {
        &self.current_hash
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn links(&self) -> ShareLinks {
        share_links(&self.current_hash)
    }

    pub const fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Load the document into `surface`.
    ///
    /// A non-empty `requested` hash wins. Otherwise the stored hash is
    /// used, and becomes current if it produced any content. On any
    /// failure the surface is cleared.
    pub fn load<S: Surface + ?Sized>(&mut self, surface: &mut S, requested: Option<&str>) {
        let requested = requested.map(str::trim).filter(|h| !h.is_empty() && *h != "#");
        let result = match requested {
            Some(hash) => {
                let hash = normalize_hash(hash);
                set(surface, &hash).map(|()| {
                    self.current_hash = hash;
                })
            }
            None => self.load_stored(surface),
        };

        if let Err(err) = result {
            tracing::warn!(%err, "failed to load document, starting empty");
            surface.set_text("");
            surface.set_style(None);
        }
        self.refresh_title(surface);
    }

    fn load_stored<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SessionError> {
        let stored = self.store.load()?.unwrap_or_default();
        set(surface, &stored)?;
        if surface.char_len() > 0 {
            self.current_hash = get(surface)?;
        }
        Ok(())
    }

    /// Save `surface` now. Returns whether the current hash changed.
    ///
    /// Store write failures are logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be encoded.
    pub fn save<S: Surface + ?Sized>(&mut self, surface: &S) -> Result<bool, SessionError> {
        self.autosave.cancel();
        let hash = get(surface)?;
        let changed = hash != self.current_hash;
        if changed {
            self.current_hash.clone_from(&hash);
        }
        if let Err(err) = self.store.store(&hash) {
            tracing::warn!(%err, "failed to persist share hash");
        }
        crate::perf::log_event("session.save", format!("changed={changed} len={}", hash.len()));
        self.refresh_title(surface);
        Ok(changed)
    }

    /// Note an input at `now_ms`; restarts the autosave window.
    pub const fn note_input(&mut self, now_ms: u64) {
        self.autosave.queue(now_ms);
    }

    /// Run a pending autosave if its window has elapsed.
    ///
    /// Returns `Ok(true)` when a save ran.
    ///
    /// # Errors
    ///
    /// See [`EditorSession::save`].
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &S, now_ms: u64) -> Result<bool, SessionError> {
        if !self.autosave.take_ready(now_ms) {
            return Ok(false);
        }
        self.save(surface).map(|_| true)
    }

    /// Write an HTML snapshot of `surface` into the download directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn download<S: Surface + ?Sized>(&mut self, surface: &S) -> Result<PathBuf, SessionError> {
        self.refresh_title(surface);
        let html = export::render_snapshot(&self.title, &surface.text(), surface.style());
        let path = export::write_snapshot(&self.download_dir, &self.title, &html)?;
        tracing::info!(path = %path.display(), "downloaded snapshot");
        Ok(path)
    }

    fn refresh_title<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.title = title_of(&surface.text());
    }
}

fn normalize_hash(hash: &str) -> String {
    if hash.starts_with('#') {
        hash.to_string()
    } else {
        format!("#{hash}")
    }
}
