//! Error types for the flappy-ql crate

use thiserror::Error;

/// Main error type for the flappy-ql crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("episode already over: the bird collided at step {step}")]
    EpisodeOver { step: u64 },

    #[error("invalid world geometry: {message}")]
    InvalidGeometry { message: String },

    #[error("invalid Q-table snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
