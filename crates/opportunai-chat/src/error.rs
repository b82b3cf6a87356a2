//! Error types for the chat assistant.

use opportunai_core::CoreError;

/// Errors from the conversation session.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("conversation closed before the reply was delivered")]
    SessionClosed,
    #[error("reply task failed: {0}")]
    ReplyTask(String),
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl From<CoreError> for ChatError {
    fn from(err: CoreError) -> Self {
        ChatError::Catalog(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ChatError {
    fn from(err: tokio::task::JoinError) -> Self {
        ChatError::ReplyTask(err.to_string())
    }
}
