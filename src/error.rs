//! Error types for request submission

use thiserror::Error;

/// Fallback shown when the endpoint rejects a request without a usable message
pub const FALLBACK_REQUEST_ERROR: &str = "Failed to submit request";

/// Local constraint violations, raised before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The security group list was empty after splitting and trimming
    #[error("At least one security group ID is required")]
    MissingSecurityGroups,

    /// The private IP address did not match the dotted-quad pattern
    #[error("Invalid IP address format")]
    InvalidIpAddress(String),

    /// The EBS volume size does not fit in a 64-bit integer
    #[error("EBS volume size is out of range: {0}")]
    VolumeSizeOutOfRange(String),

    /// The selected instance type is not one the form offers
    #[error("Unknown instance type: {0}")]
    UnknownInstanceType(String),
}

/// Failures talking to the request endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The endpoint answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response
    #[error("Failed to reach request endpoint: {0}")]
    Transport(String),

    /// A success status arrived with a body that could not be read
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The request payload could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// The in-flight request task ended without delivering a result
    #[error("Request was interrupted before a response arrived")]
    Interrupted,
}

/// Any failure of a single submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),
}
