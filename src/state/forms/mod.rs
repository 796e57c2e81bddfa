//! Form domain layer
//!
//! Type-safe form handling for the instance request form. Rendering lives in
//! `ui::forms`; this layer only knows about values and navigation.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{Form, FormButton, RequestForm, FIELD_COUNT};
