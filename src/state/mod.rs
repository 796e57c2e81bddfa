//! Application state module

mod forms;
mod request;
mod submission;

pub use forms::*;
pub use request::*;
pub use submission::*;
