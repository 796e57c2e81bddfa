//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `request_form`: The instance request form and its action panel

mod field_renderer;
mod request_form;

pub use request_form::draw_request_form;
