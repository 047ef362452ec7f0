//! Error types for FATAP chat.

use crate::onboarding::state::ConversationState;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Conversation error: {0}")]
    Conversation(#[from] ConversationError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors reported by the conversation engine.
///
/// None of these leave the session in a changed state; the caller can simply
/// submit again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    #[error("Choice '{choice}' is not available in state {state}")]
    InvalidChoice {
        choice: String,
        state: ConversationState,
    },
}

/// Front-end channel errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
