use strum::Display;

use crate::domain::Field;

/// Messages flowing through the app loop.
///
/// `Display` prints only the variant name, so field values (passwords) never
/// end up in the log when actions are traced.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    ClearScreen,
    Error(String),
    FocusNext,
    FocusPrev,
    /// The user edited an input.
    UpdateField(Field, String),
    Submit,
    /// Leave the success view.
    Back,
    SubmissionSucceeded,
    SubmissionFailed(String),
}
