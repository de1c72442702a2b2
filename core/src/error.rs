use blindfx_backend::CodecError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed ciphertext: {0}")]
    Format(String),

    #[error("value out of range: {0}")]
    Range(String),

    #[error("statistics requested over an empty ciphertext sequence")]
    EmptyInput,

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("invalid engine parameters: {0}")]
    InvalidParameters(String),
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Format(msg) => Error::Format(msg),
            CodecError::Range { log_m } => Error::Range(format!("ring element outside [0, 2^{})", log_m)),
        }
    }
}
