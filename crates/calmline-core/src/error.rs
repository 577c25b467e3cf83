use thiserror::Error;

/// Top-level error type for Calmline.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for CalmlineError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalmlineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Voice error: {0}")]
    Voice(String),
}

impl From<toml::de::Error> for CalmlineError {
    fn from(err: toml::de::Error) -> Self {
        CalmlineError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CalmlineError {
    fn from(err: toml::ser::Error) -> Self {
        CalmlineError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CalmlineError {
    fn from(err: serde_json::Error) -> Self {
        CalmlineError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Calmline operations.
pub type Result<T> = std::result::Result<T, CalmlineError>;
