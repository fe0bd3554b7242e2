use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WinupError {
    /// A bootstrap step failed; nothing was updated
    #[error("Bootstrap failed while trying to {step}: {reason}")]
    Bootstrap { step: String, reason: String },

    /// A package manager operation reported failure for one package
    #[error("{action} of '{id}' failed: {reason}")]
    OperationFailed {
        action: String,
        id: String,
        reason: String,
    },

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    #[error("System dependency missing: {0}")]
    DependencyMissing(String),

    #[error("Invalid package identifier '{id}': {reason}")]
    InvalidPackageId { id: String, reason: String },

    #[error("Failed to parse {what}: {message}")]
    ParseError { what: String, message: String },

    #[error("Transcript error at '{path}': {source}")]
    TranscriptError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path resolution or validation error
    #[error("Path error: {0}")]
    PathError(String),

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("{0}")]
    Other(String),
}

impl WinupError {
    pub fn bootstrap(step: impl Into<String>, source: WinupError) -> Self {
        Self::Bootstrap {
            step: step.into(),
            reason: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WinupError>;
