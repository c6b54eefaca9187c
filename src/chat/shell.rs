use anyhow::Result;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};

use super::command::SlashCommandCompleter;
use super::controller::{Event, IgnoreReason, ModelChoice, ModelChoiceRequest, SessionController};
use super::ui;
use crate::output;
use crate::ui::{Spinner, is_prompt_cancelled};

const NEW_MODEL_OPTION: &str = "+ Enter a new model ID";

/// The interactive terminal front end.
///
/// Reads lines, forwards them to the [`SessionController`] and renders the
/// resulting events. Input is not read while a request is in flight; the
/// shell shows a spinner until the reply arrives or Ctrl+C ends the session.
pub struct ChatShell {
    controller: SessionController,
    title: String,
}

impl ChatShell {
    pub const fn new(controller: SessionController, title: String) -> Self {
        Self { controller, title }
    }

    pub async fn run(&mut self) -> Result<()> {
        let session = self.controller.session();
        ui::print_header(&self.title, session.current_model());
        ui::print_system_prompt(session.system_prompt());

        let render_config = render_config();

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            let keep_going = match input {
                Ok(line) => match self.controller.submit(&line) {
                    Event::RequestStarted { model } => self.await_reply(&model).await?,
                    event => self.render(event)?,
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    false
                }
                Err(e) => return Err(e.into()),
            };
            if !keep_going {
                break;
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Waits for the request just started on `model`.
    ///
    /// Returns `false` if the user interrupted the wait.
    async fn await_reply(&mut self, model: &str) -> Result<bool> {
        let spinner = Spinner::new(&format!("Waiting for {model}..."));

        let outcome = tokio::select! {
            event = self.controller.next_resolution() => Some(event),
            _ = tokio::signal::ctrl_c() => None,
        };
        spinner.stop();

        match outcome {
            Some(Some(event)) => self.render(event),
            Some(None) => Ok(true),
            None => {
                tracing::debug!("interrupted while a request was in flight");
                println!();
                Ok(false)
            }
        }
    }

    /// Renders one event. Returns `false` when the session should end.
    fn render(&mut self, event: Event) -> Result<bool> {
        let mut next = Some(event);

        while let Some(event) = next.take() {
            match event {
                Event::RequestStarted { .. } => {}
                Event::Replied(reply) => ui::print_reply(&reply),
                Event::RequestFailed(error) => ui::print_request_failure(&error),
                Event::ReplyDiscarded => {
                    ui::print_notice("A reply arrived after /reset and was discarded.");
                }
                Event::Reset => ui::print_reset(self.controller.session().system_prompt()),
                Event::Saved(path) => {
                    ui::print_notice(&format!("Saved transcript to {}", path.display()));
                }
                Event::ModelChoiceRequested(request) => {
                    let choice = match pick_model(&request) {
                        Ok(choice) => choice,
                        Err(e) => {
                            self.controller.resolve_model_choice(ModelChoice::Cancelled);
                            return Err(e);
                        }
                    };
                    next = Some(self.controller.resolve_model_choice(choice));
                }
                Event::ModelSwitched { model, catalog } => {
                    ui::print_model_switched(&model, &catalog);
                }
                Event::ModelChoiceCancelled => ui::print_notice("Model unchanged."),
                Event::Help => ui::print_help(),
                Event::Status(status) => ui::print_status(&status),
                Event::Exit => return Ok(false),
                Event::UnknownCommand(name) => ui::print_error(&format!(
                    "Unknown command: /{name}. Type /help for available commands."
                )),
                Event::CommandFailed(message) => ui::print_error(&message),
                Event::Ignored(reason) => match reason {
                    IgnoreReason::Empty | IgnoreReason::NoChoicePending => {}
                    IgnoreReason::Busy => ui::print_warning("Still waiting for the previous reply."),
                    IgnoreReason::ChoicePending => ui::print_warning("Finish choosing a model first."),
                    IgnoreReason::Closed => return Ok(false),
                },
            }
        }

        Ok(true)
    }
}

/// Shows the model picker: known models plus a free-text entry.
fn pick_model(request: &ModelChoiceRequest) -> Result<ModelChoice> {
    let mut options = request.models.clone();
    options.push(NEW_MODEL_OPTION.to_string());
    let cursor = request
        .models
        .iter()
        .position(|m| *m == request.current)
        .unwrap_or(0);

    let picked = Select::new("Select a model or add a new one", options)
        .with_starting_cursor(cursor)
        .with_render_config(render_config())
        .with_help_message(&format!(
            "current: {}  ↑↓ to move, Enter to select, Esc to cancel",
            request.current
        ))
        .raw_prompt();

    let picked = match picked {
        Ok(picked) => picked,
        Err(e) if is_prompt_cancelled(&e) => return Ok(ModelChoice::Cancelled),
        Err(e) => return Err(e.into()),
    };

    if picked.index < request.models.len() {
        return Ok(ModelChoice::Chosen(picked.value));
    }

    match Text::new("Model ID:")
        .with_render_config(render_config())
        .with_help_message("e.g. anthropic/claude-3.5-sonnet, Esc to cancel")
        .prompt()
    {
        Ok(id) => Ok(ModelChoice::Chosen(id)),
        Err(e) if is_prompt_cancelled(&e) => Ok(ModelChoice::Cancelled),
        Err(e) => Err(e.into()),
    }
}

fn render_config() -> RenderConfig<'static> {
    if output::is_no_color() {
        return RenderConfig::empty();
    }

    let prompt_style = Styled::new("❯")
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    // Non-highlighted suggestions: gray
    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    // Highlighted suggestion: purple
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

    render_config
}
