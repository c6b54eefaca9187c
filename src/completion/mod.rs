//! Client for OpenRouter-compatible chat completion endpoints.

mod client;
mod error;
mod message;

pub use client::{
    ClientSettings, CompletionBackend, CompletionRequest, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT,
    OpenRouterClient,
};
pub use error::CompletionError;
pub use message::{Message, Role};
