//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Invalid voice name: {0:?}")]
    InvalidName(String),

    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Cannot modify built-in voice: {0}")]
    BuiltinProtected(String),
}
