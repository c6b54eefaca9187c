use inquire::autocompletion::{Autocomplete, Replacement};
use std::path::PathBuf;

// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/config", "Show current model and settings"),
    ("/exit", "Exit the chat"),
    ("/help", "Show available commands"),
    ("/reset", "Clear history but keep the system prompt"),
    ("/save", "Save the transcript to a text file"),
    ("/swmodel", "Switch model"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(char::is_whitespace) {
            return Ok(vec![]);
        }

        let input = input.to_lowercase();
        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(&input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Reset,
    Save(Option<PathBuf>),
    SwitchModel,
    Exit,
    Help,
    Config,
    Unknown(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

/// The command name is matched case-insensitively; arguments keep their case.
fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));

    let command = match name.to_lowercase().as_str() {
        "reset" => SlashCommand::Reset,
        "save" => SlashCommand::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "swmodel" => SlashCommand::SwitchModel,
        "exit" | "quit" | "q" => SlashCommand::Exit,
        "help" => SlashCommand::Help,
        "config" => SlashCommand::Config,
        _ => SlashCommand::Unknown(name.to_string()),
    };

    Input::Command(command)
}
