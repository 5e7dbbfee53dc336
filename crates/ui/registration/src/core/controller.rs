//! `FormController`: the form's public façade.
//!
//! Owns the working snapshot, routes every operation through the reducer and
//! publishes the result on a `watch` channel. Observers only ever see whole
//! snapshots.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::core::effects::Effect;
use crate::core::executor::resolve;
use crate::core::intent::Intent;
use crate::core::reducer::reduce;
use crate::core::state::FormSnapshot;
use crate::domain::Field;
use crate::services::submission::SubmissionClient;

pub struct FormController {
    state: FormSnapshot,
    tx: watch::Sender<FormSnapshot>,
    client: SubmissionClient,
}

impl FormController {
    pub fn new(client: SubmissionClient) -> Self {
        let (tx, _rx) = watch::channel(FormSnapshot::default());
        Self {
            state: FormSnapshot::default(),
            tx,
            client,
        }
    }

    pub fn client(&self) -> &SubmissionClient {
        &self.client
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.clone()
    }

    /// Borrow the current state without cloning (used by the renderer).
    pub fn state(&self) -> &FormSnapshot {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.tx.subscribe()
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> FormSnapshot {
        self.dispatch(Intent::UpdateField(field, value.into()));
        self.snapshot()
    }

    pub fn reset(&mut self) -> FormSnapshot {
        self.dispatch(Intent::Reset);
        self.snapshot()
    }

    /// Full submit cycle: validate, send (if valid), apply the result.
    ///
    /// Observers see `Pending` before the request goes out.
    pub async fn submit(&mut self) -> FormSnapshot {
        for effect in self.dispatch(Intent::Submit) {
            if let Effect::Submit(record) = effect {
                let resolution = resolve(&self.client, &record).await;
                self.dispatch(resolution);
            }
        }
        self.snapshot()
    }

    /// Apply `intent`, publish the new snapshot and run log effects.
    ///
    /// Returns the effects the caller must execute (`Effect::Submit`).
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        let effects = reduce(&mut self.state, intent);
        debug!(outcome = self.state.outcome.label(), errors = self.state.errors.len(), "form updated");
        self.tx.send_replace(self.state.clone());

        effects
            .into_iter()
            .filter_map(|effect| match effect {
                Effect::Log(msg) => {
                    info!("{msg}");
                    None
                }
                other => Some(other),
            })
            .collect()
    }
}
