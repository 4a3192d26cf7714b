// ui/draw.rs

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::{context::Context, store::SyncStatus, ui::spinner::spinner_frame};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 30;

// Returns false, after drawing a warning, when the area is below the minimum size.
pub fn ensure_minimum_size(buffer: &mut Buffer, area: Rect) -> bool {
    if area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT {
        return true;
    }
    let warning = Paragraph::new(format!(
        "Terminal too small ({}x{}). Please resize to at least {MIN_WIDTH}x{MIN_HEIGHT}.",
        area.width, area.height
    ))
    .style(Style::default().fg(Color::Red))
    .alignment(Alignment::Center);
    warning.render(area, buffer);
    false
}

pub fn render_header(buffer: &mut Buffer, area: Rect, title: &str) {
    let header = Paragraph::new(format!(
        "Character Forge v{} | {title}",
        env!("CARGO_PKG_VERSION")
    ))
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().border_type(BorderType::Rounded))
    .alignment(Alignment::Center);
    header.render(area, buffer);
}

// Two lines: the sync status, then the key hints of the current screen.
pub fn render_status(buffer: &mut Buffer, area: Rect, context: &Context, hints: &str) {
    let status_line = match context.store.status() {
        SyncStatus::Idle => Line::styled(
            format!("Endpoint: {}", context.settings.api_url),
            Style::default().fg(Color::DarkGray),
        ),
        SyncStatus::Loading => Line::styled(
            spinner_frame(context.spinner, "Loading roster"),
            Style::default().fg(Color::Green),
        ),
        SyncStatus::Saving => Line::styled(
            spinner_frame(context.spinner, "Saving roster"),
            Style::default().fg(Color::Green),
        ),
        SyncStatus::Error(message) => {
            Line::styled(message.clone(), Style::default().fg(Color::Red))
        }
    };

    let status = Paragraph::new(vec![
        status_line,
        Line::styled(hints.to_string(), Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    status.render(area, buffer);
}
