//! HTTP client for the request endpoint
//!
//! Posts an [`InstanceRequest`] as JSON and turns the response into either a
//! [`SubmitReceipt`] or a [`RequestError`].

use super::credentials::{request_headers, CredentialProvider, NoCredentials};
use super::traits::RequestSubmitter;
use crate::error::{RequestError, FALLBACK_REQUEST_ERROR};
use crate::state::{InstanceRequest, SubmitReceipt};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::sync::Arc;

/// Client for the request endpoint
pub struct RequestClient {
    http: Client,
    endpoint: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl RequestClient {
    /// Create a client that sends no credentials
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_credentials(endpoint, Arc::new(NoCredentials))
    }

    /// Create a client with an injected credential provider
    pub fn with_credentials(
        endpoint: &str,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid request endpoint: {endpoint}"))?;

        Ok(Self {
            http: Client::new(),
            endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl RequestSubmitter for RequestClient {
    async fn submit(&self, request: &InstanceRequest) -> Result<SubmitReceipt, RequestError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting instance request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .headers(request_headers(self.credentials.as_ref()))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    RequestError::Encode(e.to_string())
                } else {
                    RequestError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        interpret_response(status, &body)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Map a status and body to the submission result
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<SubmitReceipt, RequestError> {
    if status.is_success() {
        return serde_json::from_slice(body)
            .map_err(|e| RequestError::InvalidResponse(e.to_string()));
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_REQUEST_ERROR.to_string());

    Err(RequestError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InstanceType;
    use axum::{
        extract::State,
        http::{header::CONTENT_TYPE, HeaderMap},
        routing::post,
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::{net::TcpListener, sync::oneshot};
    use tokio_test::{assert_err, assert_ok};

    type Seen = (Option<String>, Value);

    #[derive(Clone)]
    struct ServerState {
        status: axum::http::StatusCode,
        body: &'static str,
        tx: Arc<Mutex<Option<oneshot::Sender<Seen>>>>,
    }

    async fn handle_request(
        State(state): State<ServerState>,
        headers: HeaderMap,
        Json(payload): Json<Value>,
    ) -> (axum::http::StatusCode, &'static str) {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        if let Some(tx) = state.tx.lock().unwrap().take() {
            let _ = tx.send((content_type, payload));
        }
        (state.status, state.body)
    }

    async fn spawn_request_server(
        status: u16,
        body: &'static str,
    ) -> anyhow::Result<(String, oneshot::Receiver<Seen>)> {
        let (tx, rx) = oneshot::channel();
        let state = ServerState {
            status: axum::http::StatusCode::from_u16(status)?,
            body,
            tx: Arc::new(Mutex::new(Some(tx))),
        };
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new()
            .route("/request", post(handle_request))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok((format!("http://{addr}/request"), rx))
    }

    fn sample_request() -> InstanceRequest {
        InstanceRequest {
            requester_email: "dev@example.com".to_string(),
            approver_email: "lead@example.com".to_string(),
            instance_name: "build-box".to_string(),
            instance_type: InstanceType::T3Small,
            ebs_volume_size: Some(30),
            ebs_volume_type: None,
            private_ip_address: Some("10.0.0.5".to_string()),
            subnet_id: "subnet-1".to_string(),
            security_group_ids: vec!["sg-1".to_string()],
            ami_id: None,
        }
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        assert!(RequestClient::new("not a url").is_err());
        let client = RequestClient::new("https://example.com/request").unwrap();
        assert_eq!(client.endpoint(), "https://example.com/request");
    }

    #[test]
    fn test_interpret_success() {
        let receipt = interpret_response(
            StatusCode::OK,
            br#"{"message": "Submitted", "requestId": "r-1", "executionArn": "arn:1"}"#,
        )
        .unwrap();
        assert_eq!(receipt.execution_arn.as_deref(), Some("arn:1"));
        assert_eq!(receipt.request_id.as_deref(), Some("r-1"));
    }

    #[test]
    fn test_interpret_success_with_numeric_arn() {
        let receipt = interpret_response(StatusCode::OK, br#"{"executionArn": 123}"#).unwrap();
        assert_eq!(receipt.execution_arn.as_deref(), Some("123"));

        let receipt = interpret_response(StatusCode::CREATED, br#"{"executionArn": ""}"#).unwrap();
        assert_eq!(receipt.arn_or_placeholder(), "N/A");
    }

    #[test]
    fn test_interpret_success_with_unreadable_body() {
        let err = interpret_response(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, RequestError::InvalidResponse(_)));
    }

    #[test]
    fn test_interpret_failure_fallbacks() {
        for body in [&b"not json"[..], b"{}", br#"{"message": ""}"#, br#"{"message": 5}"#] {
            let err = interpret_response(StatusCode::BAD_GATEWAY, body).unwrap_err();
            assert_eq!(
                err,
                RequestError::Rejected {
                    status: 502,
                    message: "Failed to submit request".to_string()
                }
            );
        }
    }

    #[tokio::test]
    async fn test_submit_posts_json_and_reads_arn() {
        let (url, seen) = spawn_request_server(
            200,
            r#"{"executionArn": "arn:aws:states:...:exec:123"}"#,
        )
        .await
        .expect("spawn server");
        let client = RequestClient::new(&url).unwrap();

        let receipt = assert_ok!(client.submit(&sample_request()).await);
        assert_eq!(
            receipt.execution_arn.as_deref(),
            Some("arn:aws:states:...:exec:123")
        );

        let (content_type, payload) = seen.await.unwrap();
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(payload["instanceType"], json!("t3.small"));
        assert_eq!(payload["securityGroupIds"], json!(["sg-1"]));
        assert_eq!(payload["ebsVolumeType"], Value::Null);
    }

    #[tokio::test]
    async fn test_submit_surfaces_server_message() {
        let (url, _seen) = spawn_request_server(400, r#"{"message": "quota exceeded"}"#)
            .await
            .expect("spawn server");
        let client = RequestClient::new(&url).unwrap();

        let err = assert_err!(client.submit(&sample_request()).await);
        assert_eq!(
            err,
            RequestError::Rejected {
                status: 400,
                message: "quota exceeded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_submit_unreachable_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RequestClient::new(&format!("http://{addr}/request")).unwrap();
        let err = client.submit(&sample_request()).await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }
}
