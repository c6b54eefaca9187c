use anyhow::Result;
use std::sync::Arc;

use crate::chat::{ChatShell, ModelCatalog, Session, SessionController};
use crate::cli::Args;
use crate::completion::{ClientSettings, OpenRouterClient};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::error::StartupError;
use crate::status;
use crate::store;

pub struct ChatOptions {
    pub resolve: ResolveOptions,
}

impl From<&Args> for ChatOptions {
    fn from(args: &Args) -> Self {
        Self {
            resolve: ResolveOptions {
                system_prompt: args.system_prompt.clone(),
                models_file: args.models_file.clone(),
                model: args.model.clone(),
                temperature: args.temperature,
                title: args.title.clone(),
                referer: args.referer.clone(),
                endpoint: args.endpoint.clone(),
            },
        }
    }
}

/// Loads everything the session needs, then hands over to the shell.
///
/// Startup failures (no API key, no system prompt) are returned as
/// [`StartupError`] before anything is drawn.
pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_config(&options)?;

    let system_prompt =
        store::load_system_prompt(&config.system_prompt).map_err(StartupError::from)?;
    let catalog = ModelCatalog::load(&config.models_file, &config.model);
    if !config.models_file.exists() {
        status!(
            "No model list at {}; starting with {}",
            config.models_file.display(),
            config.model
        );
    }

    let settings = ClientSettings::new(
        Some(config.api_key.clone()),
        config.title.clone(),
        config.referer.clone(),
    )
    .with_endpoint(config.endpoint.clone());
    let client = OpenRouterClient::new(settings)?;

    let session = Session::new(system_prompt, config.model.clone(), config.temperature);
    let controller = SessionController::new(session, catalog, Arc::new(client));

    ChatShell::new(controller, config.title).run().await
}

fn load_config(options: &ChatOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default();
    resolve_config(&options.resolve, &file_config)
}
