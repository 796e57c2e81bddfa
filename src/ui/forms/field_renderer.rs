//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Field height in rows (top border + value + bottom border)
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let cursor = if is_active && !field.is_choice() {
        "▌"
    } else {
        ""
    };

    let value_span = if display_value.is_empty() {
        Span::styled(
            field.placeholder,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else if is_active {
        Span::styled(display_value, Style::default().fg(Color::Cyan))
    } else {
        Span::raw(display_value)
    };

    // Cursor goes before the placeholder so it sits at the insertion point
    let line = if field.raw_value().is_empty() {
        Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            value_span,
        ])
    } else {
        Line::from(vec![
            value_span,
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let title = if field.is_required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
