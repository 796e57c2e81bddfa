//! Status region showing the outcome of the last submission

use crate::app::App;
use crate::state::{StatusMessage, SubmissionState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Minimum height of the status region, including borders
pub const STATUS_MIN_HEIGHT: u16 = 6;

/// Rows the status region needs at `width` so no wrapped line is clipped
pub fn height(app: &App, width: u16) -> u16 {
    let submission = app.submission();
    let Some(status) = submission.status() else {
        return STATUS_MIN_HEIGHT;
    };

    // Measure against the inner width; borders take one column on each side
    let rows = status_paragraph(submission, &status).line_count(width.saturating_sub(2));
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .max(STATUS_MIN_HEIGHT)
}

/// Draw the status region; hidden states render an empty placeholder
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let submission = app.submission();

    let Some(status) = submission.status() else {
        let hint = if submission.is_submitting() {
            Span::styled(
                "Waiting for the request endpoint...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled("", Style::default())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(Line::from(hint)).block(block), area);
        return;
    };

    frame.render_widget(status_paragraph(submission, &status), area);
}

fn status_paragraph<'a>(submission: &SubmissionState, status: &'a StatusMessage) -> Paragraph<'a> {
    let style = status.kind.style();
    let lines: Vec<Line> = status
        .text
        .lines()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();

    let title = match submission.finished_at() {
        Some(at) => format!("{}({}) ", status.kind.title(), at.format("%H:%M:%S")),
        None => status.kind.title().to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style);

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block)
}
