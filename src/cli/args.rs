use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "openrchat")]
#[command(about = "Chat with OpenRouter models from the terminal")]
#[command(
    after_help = "The API key is read from OPENROUTER_API_KEY.\n\
                  In the chat, type /help to list the slash commands."
)]
#[command(version)]
pub struct Args {
    /// Path to the system prompt XML file [default: system.xml]
    #[arg(long = "xml", value_name = "PATH")]
    pub system_prompt: Option<PathBuf>,

    /// Path to the model list XML file [default: models.xml]
    #[arg(long = "models", value_name = "PATH")]
    pub models_file: Option<PathBuf>,

    /// Initial model ID [default: openai/gpt-4.1-mini]
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 2.0 [default: 0.7]
    #[arg(short = 't', long)]
    pub temperature: Option<f32>,

    /// Application title sent with each request [default: CLI XML Chat]
    #[arg(long)]
    pub title: Option<String>,

    /// Referer sent with each request [default: https://localhost/cli]
    #[arg(long)]
    pub referer: Option<String>,

    /// Chat completions URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Suppress non-essential output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
