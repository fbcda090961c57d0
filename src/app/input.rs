use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::app::model::Direction;
use crate::app::{App, Message};
use crate::input::{Key, KeyEvent, Modifiers};

impl App {
    pub(super) fn handle_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            Event::Paste(text) => Some(Message::Paste(text.clone())),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: crossterm::event::KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, ctrl) {
            (KeyCode::Char('q'), true) | (KeyCode::Esc, _) => return Some(Message::Quit),
            (KeyCode::Char('s'), true) => return Some(Message::Download),
            (KeyCode::Char('l'), true) => return Some(Message::CopyLink),
            (KeyCode::Char('w'), true) => return Some(Message::Save),
            (KeyCode::Left, _) => return Some(Message::Move(Direction::Left)),
            (KeyCode::Right, _) => return Some(Message::Move(Direction::Right)),
            (KeyCode::Up, _) => return Some(Message::Move(Direction::Up)),
            (KeyCode::Down, _) => return Some(Message::Move(Direction::Down)),
            (KeyCode::Home, _) => return Some(Message::LineStart),
            (KeyCode::End, _) => return Some(Message::LineEnd),
            _ => {}
        }
        let engine_key = match key.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Char(c) => Key::Char(c),
            _ => return None,
        };
        Some(Message::Key(KeyEvent::new(
            engine_key,
            to_modifiers(key.code, key.modifiers),
        )))
    }
}

/// Terminals report Shift+Tab as `BackTab`, with or without the shift bit.
fn to_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT) || code == KeyCode::BackTab,
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        meta: modifiers.contains(KeyModifiers::META) || modifiers.contains(KeyModifiers::SUPER),
    }
}
