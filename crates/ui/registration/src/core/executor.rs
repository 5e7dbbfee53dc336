/*!
Submission executor.

Runs `Effect::Submit` off the UI loop. The event loop calls `spawn(record)`;
a single background worker performs the request and reports the result back
into the action channel as `Action::SubmissionSucceeded` or
`Action::SubmissionFailed(message)`.

Pending dispatches are dropped when the app shuts down.
*/

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::action::Action;
use crate::core::intent::Intent;
use crate::domain::FormRecord;
use crate::services::submission::SubmissionClient;

pub type TaskId = u64;

/// Cloneable handle; only wraps the dispatch sender.
#[derive(Clone)]
pub struct SubmissionExecutor {
    tx: mpsc::UnboundedSender<Dispatch>,
}

struct Dispatch {
    id: TaskId,
    record: FormRecord,
}

impl SubmissionExecutor {
    /// Create the executor and spawn its worker. Requires a Tokio runtime.
    pub fn new(client: SubmissionClient, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Dispatch>();
        Worker {
            rx,
            client,
            action_tx,
        }
        .spawn();
        Self { tx }
    }

    /// Schedule one submission. Returns the id used in the logs.
    pub fn spawn(&self, record: FormRecord) -> TaskId {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = self.tx.send(Dispatch { id, record }) {
            warn!("SubmissionExecutor channel closed; dropping task {}", e.0.id);
        }
        id
    }
}

/// Send `record` and translate the outcome into a resolution intent.
pub async fn resolve(client: &SubmissionClient, record: &FormRecord) -> Intent {
    match client.send(record).await {
        Ok(()) => Intent::SubmissionSucceeded,
        Err(err) => {
            warn!(error = %err, "submission failed");
            Intent::SubmissionFailed(err.user_message())
        }
    }
}

struct Worker {
    rx: mpsc::UnboundedReceiver<Dispatch>,
    client: SubmissionClient,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Worker {
    fn spawn(mut self) {
        tokio::spawn(async move {
            while let Some(dispatch) = self.rx.recv().await {
                self.handle(dispatch).await;
            }
            info!("SubmissionExecutor worker stopped (channel closed)");
        });
    }

    async fn handle(&self, dispatch: Dispatch) {
        info!("[task:{}] submitting registration", dispatch.id);
        let action = match resolve(&self.client, &dispatch.record).await {
            Intent::SubmissionFailed(msg) => Action::SubmissionFailed(msg),
            _ => Action::SubmissionSucceeded,
        };
        info!("[task:{}] finished: {}", dispatch.id, action);
        if self.action_tx.send(action).is_err() {
            warn!("[task:{}] action channel closed; result dropped", dispatch.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::submission::{Transport, TransportError, TransportResponse};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Arc;
    use url::Url;

    struct Fixed(StatusCode, &'static str);

    #[async_trait]
    impl Transport for Fixed {
        async fn post_json(
            &self,
            _url: &Url,
            _body: &serde_json::Value,
        ) -> Result<TransportResponse, TransportError> {
            Ok(TransportResponse::new(self.0, self.1))
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn client(status: StatusCode, body: &'static str) -> SubmissionClient {
        SubmissionClient::new(
            Arc::new(Fixed(status, body)),
            Url::parse("http://localhost:5173/").unwrap(),
        )
    }

    #[tokio::test]
    async fn worker_reports_success() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let exec = SubmissionExecutor::new(client(StatusCode::OK, ""), tx);
        exec.spawn(FormRecord::new("Jo", "jo@x.com", "abc123", "abc123"));
        assert_eq!(rx.recv().await, Some(Action::SubmissionSucceeded));
    }

    #[tokio::test]
    async fn worker_reports_server_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let exec = SubmissionExecutor::new(
            client(StatusCode::BAD_REQUEST, r#"{"message":"Email taken"}"#),
            tx,
        );
        exec.spawn(FormRecord::new("Jo", "jo@x.com", "abc123", "abc123"));
        assert_eq!(
            rx.recv().await,
            Some(Action::SubmissionFailed("Email taken".into()))
        );
    }
}
