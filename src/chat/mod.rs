//! Interactive chat mode.
//!
//! [`SessionController`] owns the conversation and drives the completion
//! calls; [`ChatShell`] is the terminal front end that feeds it lines and
//! renders what it reports.

mod catalog;
/// Slash command parsing and autocomplete.
pub mod command;
mod controller;
mod session;
mod shell;
pub mod transcript;
mod ui;

pub use catalog::ModelCatalog;
pub use controller::{
    CatalogUpdate, Event, IgnoreReason, ModelChoice, ModelChoiceRequest, RequestHandle,
    SessionController, StatusSnapshot,
};
pub use session::{Session, TranscriptEntry};
pub use shell::ChatShell;
