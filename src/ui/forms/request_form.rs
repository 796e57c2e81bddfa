//! Instance request form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{Form, FormButton, FIELD_COUNT};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Fields per column
const COLUMN_LEN: usize = FIELD_COUNT / 2;

/// Draw the request form with its action panel
pub fn draw_request_form(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(24), // Action panel
        ])
        .split(area);

    draw_fields(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

/// Draw the form fields in two columns
fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = !app.form.is_buttons_row_active();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" EC2 Instance Request ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mut rows: Vec<Constraint> = vec![Constraint::Length(FIELD_HEIGHT); COLUMN_LEN];
    rows.push(Constraint::Min(0));

    for (col, column_area) in columns.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Vertical)
            .constraints(rows.clone())
            .split(*column_area);

        for row in 0..COLUMN_LEN {
            let index = col * COLUMN_LEN + row;
            if let Some(field) = app.form.get_field(index) {
                draw_field(frame, cells[row], field, app.form.active_field() == index);
            }
        }
    }
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.form.is_buttons_row_active();
    let selected = app.form.selected_button;
    let submit = app.submission().submit_button();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit (primary)
            Constraint::Length(BUTTON_HEIGHT), // Clear Form
            Constraint::Min(0),                // remaining space
        ])
        .split(inner_area);

    render_action_button(
        frame,
        button_chunks[0],
        submit.label,
        is_focused && selected == FormButton::Submit,
        submit.enabled,
        Some(Color::Green),
    );

    render_action_button(
        frame,
        button_chunks[1],
        "Clear Form",
        is_focused && selected == FormButton::Clear,
        true,
        None,
    );
}
