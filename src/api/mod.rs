//! Request endpoint client module

mod client;
mod credentials;
mod traits;

pub use client::RequestClient;
pub use traits::RequestSubmitter;

#[cfg(test)]
pub use traits::MockRequestSubmitter;
