use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};
use crate::surface::Surface;

/// Draw the whole frame: text, toast and status bar.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_rows = u16::from(model.active_toast().is_some());
    let [text_area, toast_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(toast_rows),
        Constraint::Length(1),
    ])
    .areas(area);

    render_text(model, frame, text_area);
    render_toast_bar(model, frame, toast_area);
    render_status_bar(model, frame, status_area);
}

fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let text = model.surface.text();
    let lines: Vec<Line> = text
        .split('\n')
        .skip(model.scroll)
        .take(area.height as usize)
        .map(|line| Line::raw(line.replace('\t', " ")))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    let (line, col) = model.caret_line_col();
    if line < model.scroll {
        return;
    }
    let row = line - model.scroll;
    if row >= area.height as usize {
        return;
    }
    let prefix: String = text
        .split('\n')
        .nth(line)
        .unwrap_or_default()
        .chars()
        .take(col)
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect();
    let x = u16::try_from(prefix.width())
        .unwrap_or(u16::MAX)
        .min(area.width.saturating_sub(1));
    let y = u16::try_from(row).unwrap_or(u16::MAX);
    frame.set_cursor_position((area.x + x, area.y + y));
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let (line, col) = model.caret_line_col();
    let saved = if model.dirty { " [modified]" } else { "" };
    let tab = if model.options.tab_indent { "" } else { " [no-tab]" };
    let status = format!(
        " {}  Ln {}, Col {}{}{}  ^S:download ^L:link ^W:save ^Q:quit",
        model.session.title(),
        line + 1,
        col + 1,
        saved,
        tab
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
