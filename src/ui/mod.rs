//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod status;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (main_area, status_area, bar_area) =
        layout::create_layout(area, status::height(app, area.width));

    forms::draw_request_form(frame, main_area, app);

    // Pinned under the form so the latest outcome is always in view
    status::draw(frame, status_area, app);

    layout::draw_status_bar(frame, bar_area, app);
}
