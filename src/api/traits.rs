//! Trait abstraction for the request client to enable mocking in tests

use crate::error::RequestError;
use crate::state::{InstanceRequest, SubmitReceipt};
use async_trait::async_trait;

/// Sends a validated instance request to the request endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestSubmitter: Send + Sync {
    /// POST the request and interpret the response
    async fn submit(&self, request: &InstanceRequest) -> Result<SubmitReceipt, RequestError>;
}
