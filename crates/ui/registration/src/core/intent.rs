//! Intents: what the reducer understands.
//!
//! `Action` is the loop's message type (ticks, renders, quit, ...); only the
//! subset that changes form state is translated into an `Intent`.

use crate::action::Action;
use crate::domain::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    UpdateField(Field, String),
    Submit,
    /// The endpoint accepted the record.
    SubmissionSucceeded,
    /// The submission failed; carries the user-facing message.
    SubmissionFailed(String),
    Reset,
}

impl Intent {
    pub fn from_action(action: &Action) -> Option<Self> {
        match action {
            Action::UpdateField(field, value) => Some(Intent::UpdateField(*field, value.clone())),
            Action::Submit => Some(Intent::Submit),
            Action::Back => Some(Intent::Reset),
            Action::SubmissionSucceeded => Some(Intent::SubmissionSucceeded),
            Action::SubmissionFailed(msg) => Some(Intent::SubmissionFailed(msg.clone())),
            _ => None,
        }
    }
}
