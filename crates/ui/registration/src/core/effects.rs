/*!
Effects emitted by the reducer.

The reducer stays pure and only describes side-effects; the controller
handles `Log` itself and hands `Submit` to whoever drives the network
(the TUI's executor, or `FormController::submit` when running headless).
*/

use std::fmt;

use crate::domain::FormRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the record to the endpoint (exactly one request).
    Submit(FormRecord),
    /// Info-level log line.
    Log(String),
}

impl Effect {
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }

    pub fn none() -> Vec<Effect> {
        Vec::new()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // keine Passwörter in Logs
            Effect::Submit(record) => write!(f, "Submit(email={})", record.email),
            Effect::Log(msg) => write!(f, "Log({msg})"),
        }
    }
}
