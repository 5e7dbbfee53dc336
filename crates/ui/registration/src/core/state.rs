//! Form state.
//!
//! `FormSnapshot` is the single source of truth the presentation layer
//! renders from. The reducer mutates a working copy; every published
//! snapshot is an immutable clone.

use crate::domain::validation::validate_record;
use crate::domain::{Field, FieldError, FieldErrors, FormRecord};

/// Lifecycle of a submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

impl SubmissionOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionOutcome::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Human-readable label (useful for logs).
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionOutcome::Idle => "idle",
            SubmissionOutcome::Pending => "pending",
            SubmissionOutcome::Success => "success",
            SubmissionOutcome::Error(_) => "error",
        }
    }
}

/// Everything the view needs: values, inline errors and the submission outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub record: FormRecord,
    pub errors: FieldErrors,
    pub outcome: SubmissionOutcome,
}

impl FormSnapshot {
    pub fn value(&self, field: Field) -> &str {
        self.record.value(field)
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(field)
    }

    /// True if every rule passes for the current values.
    pub fn is_submittable(&self) -> bool {
        validate_record(&self.record).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_is_idle_and_blank() {
        let snap = FormSnapshot::default();
        assert_eq!(snap.outcome, SubmissionOutcome::Idle);
        assert!(snap.record.is_blank());
        assert!(snap.errors.is_empty());
        assert!(!snap.is_submittable());
    }

    #[test]
    fn error_message_only_for_error_outcome() {
        assert_eq!(
            SubmissionOutcome::Error("Email taken".into()).error_message(),
            Some("Email taken")
        );
        assert_eq!(SubmissionOutcome::Pending.error_message(), None);
        assert_eq!(SubmissionOutcome::Success.label(), "success");
    }
}
