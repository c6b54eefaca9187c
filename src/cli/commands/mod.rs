//! Command handlers.

/// Chat mode command handler.
pub mod chat;
