//! Submission client: one POST of the form record to the sign-up endpoint.
//!
//! The network is reached through the [`Transport`] trait so the concrete
//! strategy (plain HTTP, or HTTP behind the interception layer) is picked once
//! at startup and the rest of the app never knows which one it got.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::FormRecord;

/// Shown when a failed submission does not carry a `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Raw response as seen by the submission client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Bare response with an empty body.
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, String::new())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Strategy for sending a JSON body. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Real network transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> Result<TransportResponse, TransportError> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The endpoint answered with a non-2xx status.
    #[error("submission rejected with status {status}")]
    Rejected { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl SubmissionError {
    /// Text for the status line: the body's `message` if present, else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
            SubmissionError::Transport(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Sends validated records to the configured endpoint.
#[derive(Clone)]
pub struct SubmissionClient {
    transport: Arc<dyn Transport>,
    url: Url,
}

impl SubmissionClient {
    pub fn new(transport: Arc<dyn Transport>, url: Url) -> Self {
        Self { transport, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Exactly one request per call; 2xx is success, anything else is `Rejected`.
    #[instrument(skip_all, fields(url = %self.url, transport = self.transport.name()))]
    pub async fn send(&self, record: &FormRecord) -> Result<(), SubmissionError> {
        let body = serde_json::to_value(record).map_err(TransportError::from)?;
        let response = self.transport.post_json(&self.url, &body).await?;
        debug!(status = %response.status, "submission answered");
        if response.status.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                status: response.status,
                body: response.body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Answers every request with a fixed response and remembers the bodies.
    struct Canned {
        response: TransportResponse,
        seen: Mutex<Vec<(Url, serde_json::Value)>>,
    }

    #[async_trait]
    impl Transport for Canned {
        async fn post_json(
            &self,
            url: &Url,
            body: &serde_json::Value,
        ) -> Result<TransportResponse, TransportError> {
            self.seen.lock().unwrap().push((url.clone(), body.clone()));
            Ok(self.response.clone())
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    fn client(response: TransportResponse) -> (SubmissionClient, Arc<Canned>) {
        let transport = Arc::new(Canned {
            response,
            seen: Mutex::new(Vec::new()),
        });
        let url = Url::parse("http://localhost:5173/").unwrap();
        (SubmissionClient::new(transport.clone(), url), transport)
    }

    fn record() -> FormRecord {
        FormRecord::new("Jo", "jo@x.com", "abc123", "abc123")
    }

    #[tokio::test]
    async fn any_2xx_is_success_and_body_is_the_record() {
        let (client, transport) = client(TransportResponse::new(StatusCode::CREATED, "{}"));
        client.send(&record()).await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_str(), "http://localhost:5173/");
        assert_eq!(seen[0].1["confirmPassword"], "abc123");
    }

    #[tokio::test]
    async fn non_2xx_carries_status_and_body() {
        let (client, _) = client(TransportResponse::new(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Email taken"}"#,
        ));
        let err = client.send(&record()).await.unwrap_err();
        match &err {
            SubmissionError::Rejected { status, .. } => assert_eq!(*status, StatusCode::BAD_REQUEST),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.user_message(), "Email taken");
    }

    #[test]
    fn missing_or_malformed_message_falls_back() {
        for body in ["", "not json", r#"{"error":"x"}"#, r#"{"message":42}"#] {
            let err = SubmissionError::Rejected {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: body.to_string(),
            };
            assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE, "body: {body:?}");
        }
    }

    #[test]
    fn transport_failures_never_leak_details() {
        let err = SubmissionError::from(TransportError::Other("connection refused".into()));
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
    }
}
