use crate::app::Model;
use crate::app::model::{Direction, ToastLevel};
use crate::input::{self, Key, KeyEvent, KeyOutcome};
use crate::markdown::INDENT_WIDTH;
use crate::session::RESERVED_SEPARATOR;
use crate::surface::Surface;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// A key that may edit the document
    Key(KeyEvent),
    /// Bracketed paste, inserted without the reserved separator
    Paste(String),

    // Caret
    /// Move the caret one step
    Move(Direction),
    /// Caret to start of line
    LineStart,
    /// Caret to end of line
    LineEnd,

    // Session
    /// Save the share hash now
    Save,
    /// Write an HTML snapshot
    Download,
    /// Copy the share link to the clipboard
    CopyLink,

    // Application
    /// Terminal resized
    Resize(u16, u16),
    /// Exit
    Quit,
}

impl Message {
    /// Whether the message can change the content.
    pub const fn is_edit(&self) -> bool {
        matches!(self, Self::Key(_) | Self::Paste(_))
    }
}

/// Pure state transition for one message.
///
/// Session side effects (save, download, clipboard) run in the event loop
/// after this returns.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Key(event) => {
            let before = model.surface.text();
            handle_key_event(&mut model, &event);
            if model.surface.text() != before {
                model.dirty = true;
            }
        }
        Message::Paste(text) => {
            model.caret();
            let text: String = text
                .replace("\r\n", "\n")
                .chars()
                .filter(|&c| c != RESERVED_SEPARATOR)
                .collect();
            if !text.is_empty() && model.surface.insert_at_caret(&text) {
                model.dirty = true;
            }
        }
        Message::Move(direction) => model.move_caret(direction),
        Message::LineStart => model.move_line_edge(false),
        Message::LineEnd => model.move_line_edge(true),
        Message::Resize(width, height) => {
            model.size = (width, height);
        }
        Message::Quit => model.should_quit = true,
        Message::Save | Message::Download | Message::CopyLink => {}
    }
    model.scroll_to_caret();
    model
}

fn handle_key_event(model: &mut Model, event: &KeyEvent) {
    model.caret();
    match input::handle_key(&mut model.surface, event, &model.options) {
        Ok(KeyOutcome::Intercepted) => {}
        Ok(KeyOutcome::Native) => native_key(model, event),
        Err(err) => {
            tracing::error!(%err, "continuation edit failed");
            model.show_toast(ToastLevel::Error, format!("Edit failed: {err}"));
        }
    }
}

/// The host's default action for a key the engine did not take.
fn native_key(model: &mut Model, event: &KeyEvent) {
    if event.modifiers.ctrl || event.modifiers.alt || event.modifiers.meta {
        return;
    }
    match event.key {
        Key::Enter => {
            model.surface.insert_at_caret("\n");
        }
        Key::Backspace => {
            model.surface.delete_before_caret();
        }
        Key::Tab => {
            if !event.modifiers.shift {
                model.surface.insert_at_caret(&" ".repeat(INDENT_WIDTH));
            }
        }
        Key::Char(RESERVED_SEPARATOR) => {}
        Key::Char(c) => {
            let mut buf = [0u8; 4];
            model.surface.insert_at_caret(c.encode_utf8(&mut buf));
        }
        Key::Other => {}
    }
}
