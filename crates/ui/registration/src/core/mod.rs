//! Kern der Registrierungs-App.
//!
//! Ablauf: `Action` -> `Intent` -> `reduce` -> `Effect`s.
//!   - `state`      : `FormSnapshot` und `SubmissionOutcome`
//!   - `intent`     : Übersetzung Loop-Actions -> Formular-Intents
//!   - `reducer`    : reine Zustandsübergänge inkl. Validierungs-Policy
//!   - `effects`    : deklarative Seiteneffekte (Submit, Log)
//!   - `executor`   : führt Submits im Hintergrund aus (TUI)
//!   - `controller` : Fassade mit `watch`-Snapshots (TUI und headless)
pub mod controller;
pub mod effects;
pub mod executor;
pub mod intent;
pub mod reducer;
pub mod state;

pub use controller::FormController;
pub use state::{FormSnapshot, SubmissionOutcome};
