//! One-shot submission without the TUI (`registration submit ...`).

use tracing::info;

use crate::core::{FormController, FormSnapshot, SubmissionOutcome};
use crate::domain::{Field, FormRecord};
use crate::services::submission::SubmissionClient;

/// Exit codes of the `submit` subcommand.
pub const EXIT_OK: i32 = 0;
pub const EXIT_REJECTED: i32 = 1;
pub const EXIT_INVALID: i32 = 2;

/// Feed `record` through the controller field by field, then submit once.
pub async fn submit(client: SubmissionClient, record: FormRecord) -> FormSnapshot {
    let mut controller = FormController::new(client);
    for field in Field::ALL {
        controller.update_field(field, record.value(field));
    }
    let snapshot = controller.submit().await;
    info!(outcome = snapshot.outcome.label(), "headless submission finished");
    snapshot
}

/// Lines to print for `snapshot` plus the process exit code.
pub fn report(snapshot: &FormSnapshot) -> (Vec<String>, i32) {
    match &snapshot.outcome {
        SubmissionOutcome::Success => (vec!["Registration successful!".to_string()], EXIT_OK),
        SubmissionOutcome::Error(msg) => (vec![format!("Error: {msg}")], EXIT_REJECTED),
        SubmissionOutcome::Idle | SubmissionOutcome::Pending => (
            snapshot
                .errors
                .iter()
                .map(|(field, err)| format!("{field}: {err}"))
                .collect(),
            EXIT_INVALID,
        ),
    }
}
