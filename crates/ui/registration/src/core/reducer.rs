//! Reducer: `(state, intent) -> effects`.
//!
//! All form state transitions live here. The function mutates the working
//! snapshot in place and returns the side-effects the caller has to run; it
//! never performs I/O itself.
//!
//! Validation policy:
//!   * an edit re-validates only the edited field
//!   * editing the password also re-validates the confirmation once the
//!     confirmation has a value or already shows an error
//!   * submit validates every field and refuses to proceed on any error
//!   * a submit while a request is in flight is ignored
//!   * a resolution that arrives when nothing is pending is stale and dropped

use crate::core::effects::Effect;
use crate::core::intent::Intent;
use crate::core::state::{FormSnapshot, SubmissionOutcome};
use crate::domain::validation::{validate_field, validate_record};
use crate::domain::Field;
use crate::services::submission::FALLBACK_ERROR_MESSAGE;

pub const SUCCESS_MESSAGE: &str = "Registration successful!";

pub fn reduce(state: &mut FormSnapshot, intent: Intent) -> Vec<Effect> {
    match intent {
        Intent::UpdateField(field, value) => {
            update_field(state, field, value);
            Effect::none()
        }
        Intent::Submit => submit(state),
        Intent::SubmissionSucceeded => {
            if !state.outcome.is_pending() {
                return vec![Effect::log("ignoring stale submission result")];
            }
            *state = FormSnapshot {
                outcome: SubmissionOutcome::Success,
                ..FormSnapshot::default()
            };
            vec![Effect::log(SUCCESS_MESSAGE)]
        }
        Intent::SubmissionFailed(message) => {
            if !state.outcome.is_pending() {
                return vec![Effect::log("ignoring stale submission result")];
            }
            let line = if message == FALLBACK_ERROR_MESSAGE {
                message.clone()
            } else {
                format!("Error: {message}")
            };
            state.outcome = SubmissionOutcome::Error(message);
            vec![Effect::Log(line)]
        }
        Intent::Reset => {
            *state = FormSnapshot::default();
            Effect::none()
        }
    }
}

fn update_field(state: &mut FormSnapshot, field: Field, value: String) {
    state.record.set(field, value);
    state
        .errors
        .apply(field, validate_field(field, &state.record));

    if field == Field::Password
        && (!state.record.confirm_password.is_empty()
            || state.errors.contains(Field::ConfirmPassword))
    {
        state.errors.apply(
            Field::ConfirmPassword,
            validate_field(Field::ConfirmPassword, &state.record),
        );
    }
}

fn submit(state: &mut FormSnapshot) -> Vec<Effect> {
    if state.outcome.is_pending() {
        return Effect::none();
    }
    state.errors = validate_record(&state.record);
    if !state.errors.is_empty() {
        return Effect::none();
    }
    state.outcome = SubmissionOutcome::Pending;
    vec![Effect::Submit(state.record.clone())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldError, FormRecord};
    use pretty_assertions::assert_eq;

    fn filled() -> FormSnapshot {
        FormSnapshot {
            record: FormRecord::new("Jo", "jo@x.com", "abc123", "abc123"),
            ..FormSnapshot::default()
        }
    }

    fn update(state: &mut FormSnapshot, field: Field, value: &str) -> Vec<Effect> {
        reduce(state, Intent::UpdateField(field, value.into()))
    }

    #[test]
    fn edit_validates_only_that_field() {
        let mut state = FormSnapshot::default();
        update(&mut state, Field::Email, "nope");
        assert_eq!(state.error(Field::Email), Some(FieldError::Format));
        assert_eq!(state.errors.len(), 1);

        update(&mut state, Field::Email, "a@b.co");
        assert!(state.errors.is_empty());
    }

    #[test]
    fn password_edit_revalidates_filled_confirmation() {
        let mut state = FormSnapshot::default();
        update(&mut state, Field::Password, "abc123");
        update(&mut state, Field::ConfirmPassword, "abc123");
        assert!(state.errors.is_empty());

        update(&mut state, Field::Password, "abc1234");
        assert_eq!(state.error(Field::ConfirmPassword), Some(FieldError::Mismatch));

        update(&mut state, Field::Password, "abc123");
        assert_eq!(state.error(Field::ConfirmPassword), None);
    }

    #[test]
    fn password_edit_leaves_untouched_confirmation_alone() {
        let mut state = FormSnapshot::default();
        update(&mut state, Field::Password, "abc123");
        assert_eq!(state.error(Field::ConfirmPassword), None);
    }

    #[test]
    fn submit_with_errors_stays_idle_and_emits_nothing() {
        let mut state = FormSnapshot::default();
        update(&mut state, Field::Name, "Jo");
        let effects = reduce(&mut state, Intent::Submit);

        assert!(effects.is_empty());
        assert_eq!(state.outcome, SubmissionOutcome::Idle);
        assert_eq!(state.error(Field::Name), None);
        assert_eq!(state.error(Field::Email), Some(FieldError::Required(Field::Email)));
        assert_eq!(
            state.error(Field::Password),
            Some(FieldError::Required(Field::Password))
        );
        assert_eq!(
            state.error(Field::ConfirmPassword),
            Some(FieldError::Required(Field::ConfirmPassword))
        );
    }

    #[test]
    fn valid_submit_goes_pending_with_one_request() {
        let mut state = filled();
        let effects = reduce(&mut state, Intent::Submit);
        assert_eq!(effects, vec![Effect::Submit(state.record.clone())]);
        assert!(state.outcome.is_pending());
    }

    #[test]
    fn submit_while_pending_is_ignored() {
        let mut state = filled();
        reduce(&mut state, Intent::Submit);
        let before = state.clone();

        assert!(reduce(&mut state, Intent::Submit).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn success_clears_everything() {
        let mut state = filled();
        reduce(&mut state, Intent::Submit);
        let effects = reduce(&mut state, Intent::SubmissionSucceeded);

        assert_eq!(effects, vec![Effect::log(SUCCESS_MESSAGE)]);
        assert_eq!(state.outcome, SubmissionOutcome::Success);
        assert!(state.record.is_blank());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn failure_keeps_values_and_exposes_message() {
        let mut state = filled();
        reduce(&mut state, Intent::Submit);
        let effects = reduce(&mut state, Intent::SubmissionFailed("Email taken".into()));

        assert_eq!(effects, vec![Effect::log("Error: Email taken")]);
        assert_eq!(state.outcome.error_message(), Some("Email taken"));
        assert_eq!(state.record, filled().record);
    }

    #[test]
    fn generic_failure_logs_fallback_verbatim() {
        let mut state = filled();
        reduce(&mut state, Intent::Submit);
        let effects = reduce(
            &mut state,
            Intent::SubmissionFailed(FALLBACK_ERROR_MESSAGE.into()),
        );
        assert_eq!(effects, vec![Effect::log(FALLBACK_ERROR_MESSAGE)]);
    }

    #[test]
    fn error_persists_across_edits_until_next_submit() {
        let mut state = filled();
        reduce(&mut state, Intent::Submit);
        reduce(&mut state, Intent::SubmissionFailed("Email taken".into()));

        update(&mut state, Field::Email, "other@x.com");
        assert_eq!(state.outcome.error_message(), Some("Email taken"));

        reduce(&mut state, Intent::Submit);
        assert!(state.outcome.is_pending());
    }

    #[test]
    fn stale_resolution_is_dropped() {
        let mut state = filled();
        reduce(&mut state, Intent::SubmissionSucceeded);
        assert_eq!(state.outcome, SubmissionOutcome::Idle);
        assert_eq!(state.record, filled().record);
    }

    #[test]
    fn reset_returns_to_pristine_form() {
        let mut state = filled();
        reduce(&mut state, Intent::Submit);
        reduce(&mut state, Intent::SubmissionSucceeded);
        reduce(&mut state, Intent::Reset);
        assert_eq!(state, FormSnapshot::default());
    }
}
