//! Error types for the narration adapter.

use lexintake_core::error::IntakeError;

/// Errors from the narration adapter.
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("narration text cannot be empty")]
    EmptyText,
    #[error("narration engine error: {0}")]
    Engine(String),
    #[error("narration is disabled")]
    Disabled,
}

impl From<NarrationError> for IntakeError {
    fn from(err: NarrationError) -> Self {
        IntakeError::Narration(err.to_string())
    }
}
