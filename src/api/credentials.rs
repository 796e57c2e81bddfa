//! Credential injection for outbound requests

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Supplies a bearer token for the request endpoint.
///
/// Nothing issues tokens yet; [`NoCredentials`] is the only provider wired in.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Provider that never adds an `Authorization` header
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Build the headers for a submission
pub fn request_headers(credentials: &dyn CredentialProvider) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = credentials.bearer_token() {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Ignoring bearer token with invalid header characters"),
        }
    }

    headers
}
