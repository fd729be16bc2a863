//! # LabBridge Transport
//!
//! HTTP submission of assembled result messages to the remote results
//! endpoint.
//!
//! The exchange is a single POST carrying `{"message": <encoded string>}`.
//! Exactly two response statuses signal acceptance (200 and 201); any other
//! status, or a transport-level failure, is surfaced as an error carrying
//! the server-provided message when one is available. There is no automatic
//! retry or backoff — a failed send requires the operator to re-trigger.
//!
//! The core imposes no timeout of its own; callers that want one configure
//! it on the client at construction time.

use hl7::EncodedMessage;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response statuses that signal acceptance.
pub const ACCEPTED_STATUSES: [u16; 2] = [200, 201];

/// Errors returned by the transport crate.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to reach results endpoint: {0}")]
    Http(#[from] reqwest::Error),

    #[error("results endpoint rejected the message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Type alias for Results that can fail with a [`TransportError`].
pub type TransportResult<T> = Result<T, TransportError>;

/// Acknowledgement for an accepted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendReceipt {
    /// The accepting status code (200 or 201).
    pub status: u16,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ServerMessage {
    message: String,
}

/// Client for the remote results endpoint.
#[derive(Clone, Debug)]
pub struct ResultsClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ResultsClient {
    /// Creates a client for `endpoint` with no request timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client for `endpoint` that aborts requests after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying client cannot be
    /// built.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> TransportResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    /// Submits one assembled message.
    ///
    /// Single request-response exchange, never retried. Cancellation happens
    /// only by the caller dropping the future.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] on a transport-level failure and
    /// [`TransportError::Rejected`] when the endpoint answers with a
    /// non-accepted status; the server-provided message is attached when
    /// the body carries one.
    pub async fn submit(&self, message: &EncodedMessage) -> TransportResult<SendReceipt> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&SubmitBody {
                message: message.as_str(),
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let receipt = interpret_response(status, &body);

        match &receipt {
            Ok(receipt) => {
                tracing::info!("results endpoint accepted message (status {})", receipt.status);
            }
            Err(err) => tracing::warn!("submission failed: {err}"),
        }
        receipt
    }
}

/// Maps a response status and body to the submission outcome.
///
/// Accepted statuses produce a [`SendReceipt`]; anything else produces
/// [`TransportError::Rejected`] with the server's `message` field when the
/// body is JSON of that shape, the raw body when it is non-empty text, or a
/// generic failure message otherwise.
fn interpret_response(status: u16, body: &str) -> TransportResult<SendReceipt> {
    if ACCEPTED_STATUSES.contains(&status) {
        return Ok(SendReceipt { status });
    }

    let message = match serde_json::from_str::<ServerMessage>(body) {
        Ok(server) => server.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => "submission failed".to_string(),
    };

    Err(TransportError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_two_success_statuses() {
        assert_eq!(
            interpret_response(200, "").expect("accepted"),
            SendReceipt { status: 200 }
        );
        assert_eq!(
            interpret_response(201, "").expect("accepted"),
            SendReceipt { status: 201 }
        );
        assert!(interpret_response(204, "").is_err());
        assert!(interpret_response(500, "").is_err());
    }

    #[test]
    fn surfaces_server_json_message_on_rejection() {
        let err = interpret_response(422, r#"{"message":"order not found"}"#)
            .expect_err("rejected");
        match err {
            TransportError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "order not found");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_raw_body_then_generic_message() {
        let err = interpret_response(500, "internal error").expect_err("rejected");
        match err {
            TransportError::Rejected { message, .. } => assert_eq!(message, "internal error"),
            other => panic!("expected Rejected, got {other:?}"),
        }

        let err = interpret_response(502, "   ").expect_err("rejected");
        match err {
            TransportError::Rejected { message, .. } => assert_eq!(message, "submission failed"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
