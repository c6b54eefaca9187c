use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::completion::DEFAULT_ENDPOINT;
use crate::error::StartupError;
use crate::paths;

pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TITLE: &str = "CLI XML Chat";
pub const DEFAULT_REFERER: &str = "https://localhost/cli";
pub const DEFAULT_SYSTEM_PROMPT_FILE: &str = "system.xml";
pub const DEFAULT_MODELS_FILE: &str = "models.xml";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Default settings in the `[chat]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatConfig {
    /// Initial model ID.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Sent to the API as `X-Title`.
    pub title: Option<String>,
    /// Sent to the API as `HTTP-Referer`.
    pub referer: Option<String>,
    /// Path of the system prompt document.
    pub system_prompt: Option<PathBuf>,
    /// Path of the model catalog document.
    pub models_file: Option<PathBuf>,
    /// Chat completions URL.
    pub endpoint: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/openrchat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub system_prompt: Option<PathBuf>,
    pub models_file: Option<PathBuf>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub title: Option<String>,
    pub referer: Option<String>,
    pub endpoint: Option<String>,
}

/// Resolved configuration after merging CLI arguments, config file and
/// built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub system_prompt: PathBuf,
    pub models_file: PathBuf,
    pub model: String,
    pub temperature: f32,
    pub title: String,
    pub referer: String,
    pub endpoint: String,
    pub api_key: String,
}

/// Resolves configuration, reading the API key from the process environment.
///
/// # Errors
///
/// Returns [`StartupError::MissingCredential`] if the key variable is unset or
/// blank, or an error for an out-of-range temperature.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    resolve_config_with(options, config_file, |name| std::env::var(name).ok())
}

/// Like [`resolve_config`], with the environment lookup supplied by the caller.
pub fn resolve_config_with(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let file = &config_file.chat;

    // The credential is checked first: nothing else matters without it.
    let api_key_env = file
        .api_key_env
        .clone()
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
    let api_key = env(&api_key_env)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(StartupError::MissingCredential { var: api_key_env })?;

    let temperature = options
        .temperature
        .or(file.temperature)
        .unwrap_or(DEFAULT_TEMPERATURE);
    if !TEMPERATURE_RANGE.contains(&temperature) {
        bail!(
            "Invalid temperature: {temperature}\n\n\
             Temperature must be between {} and {}.",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        );
    }

    let pick = |cli: &Option<String>, file: &Option<String>, default: &str| {
        cli.as_ref()
            .or(file.as_ref())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    Ok(ResolvedConfig {
        system_prompt: options
            .system_prompt
            .as_ref()
            .or(file.system_prompt.as_ref())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSTEM_PROMPT_FILE)),
        models_file: options
            .models_file
            .as_ref()
            .or(file.models_file.as_ref())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODELS_FILE)),
        model: pick(&options.model, &file.model, DEFAULT_MODEL),
        temperature,
        title: pick(&options.title, &file.title, DEFAULT_TITLE),
        referer: pick(&options.referer, &file.referer, DEFAULT_REFERER),
        endpoint: pick(&options.endpoint, &file.endpoint, DEFAULT_ENDPOINT),
        api_key,
    })
}

/// Locates and loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/openrchat/config.toml`
    /// or `~/.config/openrchat/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is reported and ignored.
    pub fn load_or_default(&self) -> ConfigFile {
        if !self.config_path.exists() {
            return ConfigFile::default();
        }
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "ignoring config file");
            ConfigFile::default()
        })
    }
}
