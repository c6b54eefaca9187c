//! Conditions that stop the program before the chat starts.

use thiserror::Error;

use crate::store::PromptNotFound;

#[derive(Debug, Error)]
pub enum StartupError {
    /// The API key environment variable is unset or blank.
    #[error(
        "{var} is not set.\n\n\
         Set your OpenRouter API key:\n  \
         export {var}=\"sk-or-...\""
    )]
    MissingCredential { var: String },

    #[error(transparent)]
    SystemPrompt(#[from] PromptNotFound),
}

impl StartupError {
    /// Process exit status for this failure (sysexits).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredential { .. } => exitcode::CONFIG,
            Self::SystemPrompt(_) => exitcode::NOINPUT,
        }
    }
}
