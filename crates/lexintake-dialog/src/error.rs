//! Error types for the dialogue engine and session store.

use lexintake_core::error::IntakeError;
use lexintake_core::types::Stage;

/// Errors from the dialogue layer.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("invalid stage transition: {0:?} -> {1:?}")]
    InvalidTransition(Stage, Stage),
    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<DialogError> for IntakeError {
    fn from(err: DialogError) -> Self {
        IntakeError::Dialog(err.to_string())
    }
}
