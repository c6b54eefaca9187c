//! The session controller: the single owner of conversation state.
//!
//! Input is either a chat turn or a slash command. A chat turn starts exactly
//! one completion call on a spawned task and moves the controller from
//! [`Phase::Idle`] to [`Phase::Busy`]; the reply comes back over a one-shot
//! channel and is applied by [`SessionController::next_resolution`]. While
//! busy, further chat turns are ignored rather than queued. Commands run
//! synchronously in either phase.
//!
//! Every call returns one [`Event`] describing what changed, which the
//! terminal shell renders.

use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

use super::catalog::ModelCatalog;
use super::command::{Input, SlashCommand, parse_input};
use super::session::Session;
use super::transcript;
use crate::completion::{CompletionBackend, CompletionError, CompletionRequest, Message};

/// Opaque token for the completion call currently in flight.
#[derive(Debug)]
pub struct RequestHandle {
    id: u64,
    started: Instant,
    /// Reset count when the request started.
    generation: u64,
}

impl RequestHandle {
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[derive(Debug)]
struct PendingRequest {
    handle: RequestHandle,
    reply: oneshot::Receiver<Result<String, CompletionError>>,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Busy(PendingRequest),
}

/// What the shell offers in the model picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChoiceRequest {
    pub models: Vec<String>,
    pub current: String,
}

/// Answer to a [`ModelChoiceRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Chosen(String),
    Cancelled,
}

/// Effect of a model switch on the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogUpdate {
    /// The model was already listed.
    Known,
    /// The model was appended and the catalog saved.
    Added,
    /// The model was appended but saving the catalog failed.
    Unsaved(String),
}

/// Read-only view for `/config`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub model: String,
    pub temperature: f32,
    pub user_turns: usize,
    pub catalog_size: usize,
    pub busy: bool,
}

/// Why an input was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Empty,
    /// A chat turn arrived while a request is in flight.
    Busy,
    /// Input arrived while the model picker is open.
    ChoicePending,
    /// A model choice arrived without a pending picker.
    NoChoicePending,
    /// The session has ended.
    Closed,
}

/// Outcome of one controller step.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RequestStarted { model: String },
    Replied(String),
    RequestFailed(CompletionError),
    /// The request finished after `/reset`; its result was dropped.
    ReplyDiscarded,
    Reset,
    Saved(PathBuf),
    ModelChoiceRequested(ModelChoiceRequest),
    ModelSwitched { model: String, catalog: CatalogUpdate },
    ModelChoiceCancelled,
    Help,
    Status(StatusSnapshot),
    Exit,
    UnknownCommand(String),
    CommandFailed(String),
    Ignored(IgnoreReason),
}

pub struct SessionController {
    session: Session,
    catalog: ModelCatalog,
    backend: Arc<dyn CompletionBackend>,
    phase: Phase,
    next_request_id: u64,
    generation: u64,
    awaiting_choice: bool,
    closed: bool,
}

impl SessionController {
    pub fn new(session: Session, catalog: ModelCatalog, backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            session,
            catalog,
            backend,
            phase: Phase::Idle,
            next_request_id: 0,
            generation: 0,
            awaiting_choice: false,
            closed: false,
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub const fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy(_))
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    pub const fn pending_request(&self) -> Option<&RequestHandle> {
        match &self.phase {
            Phase::Busy(pending) => Some(&pending.handle),
            Phase::Idle => None,
        }
    }

    /// Handles one line of user input.
    ///
    /// Must be called from within a Tokio runtime: a chat turn spawns its
    /// completion call and returns without waiting for it.
    pub fn submit(&mut self, line: &str) -> Event {
        if self.closed {
            return Event::Ignored(IgnoreReason::Closed);
        }
        if self.awaiting_choice {
            return Event::Ignored(IgnoreReason::ChoicePending);
        }

        match parse_input(line) {
            Input::Empty => Event::Ignored(IgnoreReason::Empty),
            Input::Command(command) => self.dispatch(command),
            Input::Text(text) => self.start_turn(text),
        }
    }

    /// Applies the answer from the model picker opened by `/swmodel`.
    pub fn resolve_model_choice(&mut self, choice: ModelChoice) -> Event {
        if !self.awaiting_choice {
            return Event::Ignored(IgnoreReason::NoChoicePending);
        }
        self.awaiting_choice = false;

        let model = match choice {
            ModelChoice::Chosen(model) if !model.trim().is_empty() => model.trim().to_string(),
            ModelChoice::Chosen(_) | ModelChoice::Cancelled => return Event::ModelChoiceCancelled,
        };

        self.session.set_model(model.clone());
        let catalog = match self.catalog.insert(&model) {
            Ok(true) => CatalogUpdate::Added,
            Ok(false) => CatalogUpdate::Known,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist model catalog");
                CatalogUpdate::Unsaved(format!("{e:#}"))
            }
        };

        tracing::debug!(model = %model, ?catalog, "switched model");
        Event::ModelSwitched { model, catalog }
    }

    /// Waits for the in-flight request and applies its result.
    ///
    /// Returns `None` when idle. Dropping the future before it completes
    /// leaves the request pending.
    pub async fn next_resolution(&mut self) -> Option<Event> {
        let Phase::Busy(pending) = &mut self.phase else {
            return None;
        };

        let result = (&mut pending.reply).await.unwrap_or_else(|_| {
            Err(CompletionError::Transport(
                "request worker stopped before replying".to_string(),
            ))
        });

        let Phase::Busy(pending) = std::mem::take(&mut self.phase) else {
            return None;
        };
        Some(self.on_request_resolved(pending.handle, result))
    }

    fn on_request_resolved(
        &mut self,
        handle: RequestHandle,
        result: Result<String, CompletionError>,
    ) -> Event {
        tracing::debug!(
            request = handle.id,
            elapsed_ms = handle.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "request resolved"
        );

        if handle.generation != self.generation {
            tracing::debug!(request = handle.id, "dropping result of a request started before reset");
            return Event::ReplyDiscarded;
        }

        match result {
            Ok(reply) => {
                self.session.push(Message::assistant(reply.clone()));
                Event::Replied(reply)
            }
            Err(error) => Event::RequestFailed(error),
        }
    }

    fn start_turn(&mut self, text: String) -> Event {
        if self.is_busy() {
            tracing::debug!("chat turn ignored while a request is in flight");
            return Event::Ignored(IgnoreReason::Busy);
        }

        self.session.push(Message::user(text));

        let request = CompletionRequest {
            model: self.session.current_model().to_string(),
            messages: self.session.messages().to_vec(),
            temperature: self.session.temperature(),
        };
        let handle = RequestHandle {
            id: self.next_request_id,
            started: Instant::now(),
            generation: self.generation,
        };
        self.next_request_id += 1;

        tracing::debug!(
            request = handle.id,
            model = %request.model,
            messages = request.messages.len(),
            "starting chat turn"
        );

        let (tx, rx) = oneshot::channel();
        let call = self.backend.complete(request);
        tokio::spawn(async move {
            // The receiver is gone if the session ended first.
            let _ = tx.send(call.await);
        });

        self.phase = Phase::Busy(PendingRequest { handle, reply: rx });
        Event::RequestStarted {
            model: self.session.current_model().to_string(),
        }
    }

    fn dispatch(&mut self, command: SlashCommand) -> Event {
        match command {
            SlashCommand::Reset => {
                self.session.reset();
                self.generation += 1;
                Event::Reset
            }
            SlashCommand::Save(path) => self.save_transcript(path),
            SlashCommand::SwitchModel => {
                self.awaiting_choice = true;
                Event::ModelChoiceRequested(ModelChoiceRequest {
                    models: self.catalog.models().to_vec(),
                    current: self.session.current_model().to_string(),
                })
            }
            SlashCommand::Exit => {
                self.closed = true;
                Event::Exit
            }
            SlashCommand::Help => Event::Help,
            SlashCommand::Config => Event::Status(self.status()),
            SlashCommand::Unknown(name) => Event::UnknownCommand(name),
        }
    }

    fn save_transcript(&self, path: Option<PathBuf>) -> Event {
        let path = path.unwrap_or_else(|| transcript::default_path(Local::now()));
        match transcript::save(&path, self.session.transcript()) {
            Ok(()) => Event::Saved(path),
            Err(e) => Event::CommandFailed(format!("Save failed: {e:#}")),
        }
    }

    fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            model: self.session.current_model().to_string(),
            temperature: self.session.temperature(),
            user_turns: self.session.user_turns(),
            catalog_size: self.catalog.len(),
            busy: self.is_busy(),
        }
    }
}
