use std::time::{Duration, Instant};

use crate::editor::Buffer;
use crate::input::ContinuationOptions;
use crate::session::{EditorSession, HashStore};
use crate::surface::{FragmentedSurface, Surface, current_offset, place_caret};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Direction for native caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The complete host state.
#[derive(Debug)]
pub struct Model {
    /// The editable surface
    pub surface: FragmentedSurface,
    /// Persistence and sharing
    pub session: EditorSession,
    /// Engine switches
    pub options: ContinuationOptions,
    /// First visible line
    pub scroll: usize,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// Content changed since the last save
    pub dirty: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            FragmentedSurface::new(),
            EditorSession::new(HashStore::memory()),
            (80, 24),
        )
    }
}

impl Model {
    pub fn new(surface: FragmentedSurface, session: EditorSession, size: (u16, u16)) -> Self {
        let mut model = Self {
            surface,
            session,
            options: ContinuationOptions::default(),
            scroll: 0,
            size,
            dirty: false,
            should_quit: false,
            toast: None,
        };
        if current_offset(&model.surface).is_none() {
            let end = model.surface.char_len();
            place_caret(&mut model.surface, end);
        }
        model
    }

    /// Caret offset, placing the caret at the end if it was lost.
    pub fn caret(&mut self) -> usize {
        if let Some(offset) = current_offset(&self.surface) {
            return offset;
        }
        let end = self.surface.char_len();
        place_caret(&mut self.surface, end);
        end
    }

    /// Zero-based (line, column) of the caret, in chars.
    pub fn caret_line_col(&self) -> (usize, usize) {
        let caret = current_offset(&self.surface).unwrap_or(0);
        let buffer = Buffer::snapshot(&self.surface);
        let Some(ctx) = buffer.line_around(caret) else {
            return (0, 0);
        };
        let line = buffer.slice(0..ctx.line_start).matches('\n').count();
        (line, ctx.caret_column)
    }

    /// Number of rows available for text, below which sit the toast and
    /// status bars.
    pub fn text_height(&self) -> usize {
        let footer = 1 + u16::from(self.toast.is_some());
        self.size.1.saturating_sub(footer) as usize
    }

    /// Adjust scroll so the caret line is visible.
    pub fn scroll_to_caret(&mut self) {
        let (line, _) = self.caret_line_col();
        let height = self.text_height().max(1);
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }

    /// Native caret movement, the host's default for arrow keys.
    pub fn move_caret(&mut self, direction: Direction) {
        let caret = self.caret();
        let buffer = Buffer::snapshot(&self.surface);
        let target = match direction {
            Direction::Left => caret.saturating_sub(1),
            Direction::Right => (caret + 1).min(buffer.len_chars()),
            Direction::Up | Direction::Down => {
                let Some(ctx) = buffer.line_around(caret) else {
                    return;
                };
                let neighbour = if direction == Direction::Up {
                    if ctx.line_start == 0 {
                        return;
                    }
                    buffer.line_around(ctx.line_start - 1)
                } else {
                    if ctx.line_end == buffer.len_chars() {
                        return;
                    }
                    buffer.line_around(ctx.line_end + 1)
                };
                let Some(neighbour) = neighbour else {
                    return;
                };
                let len = neighbour.line_end - neighbour.line_start;
                neighbour.line_start + ctx.caret_column.min(len)
            }
        };
        place_caret(&mut self.surface, target);
    }

    /// Move the caret to the start or end of its line.
    pub fn move_line_edge(&mut self, to_end: bool) {
        let caret = self.caret();
        let Some(ctx) = Buffer::snapshot(&self.surface).line_around(caret) else {
            return;
        };
        let target = if to_end { ctx.line_end } else { ctx.line_start };
        place_caret(&mut self.surface, target);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
