//! # openrchat - Terminal chat client for OpenRouter
//!
//! `openrchat` holds a multi-turn conversation with any model served by the
//! OpenRouter chat completions API. The system prompt and the list of known
//! models live in small XML files next to the working directory.
//!
//! ## Quick Start
//!
//! ```bash
//! export OPENROUTER_API_KEY="sk-or-..."
//!
//! # Start with system.xml and models.xml from the current directory
//! openrchat
//!
//! # Pick the prompt, model and temperature explicitly
//! openrchat --xml prompts/reviewer.xml -m anthropic/claude-3.5-sonnet -t 0.2
//! ```
//!
//! ## Slash commands
//!
//! `/reset`, `/save [file]`, `/swmodel`, `/config`, `/help` and `/exit`.
//!
//! ## Configuration
//!
//! Defaults can be set in `~/.config/openrchat/config.toml`:
//!
//! ```toml
//! [chat]
//! model = "openai/gpt-4.1-mini"
//! temperature = 0.7
//! system_prompt = "system.xml"
//! models_file = "models.xml"
//! ```

/// Interactive chat: session state, controller and terminal shell.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// OpenRouter chat completions client.
pub mod completion;

/// Configuration file management and option merging.
pub mod config;

/// Startup errors and their exit codes.
pub mod error;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet mode, colors, tracing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// System prompt and model list XML files.
pub mod store;

/// Terminal UI components (spinner, colors).
pub mod ui;
