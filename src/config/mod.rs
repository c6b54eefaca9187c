//! Configuration file management and CLI/file/default merging.

mod manager;

pub use manager::{
    ChatConfig, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_MODEL, DEFAULT_MODELS_FILE,
    DEFAULT_REFERER, DEFAULT_SYSTEM_PROMPT_FILE, DEFAULT_TEMPERATURE, DEFAULT_TITLE,
    ResolveOptions, ResolvedConfig, resolve_config, resolve_config_with,
};
