//! Error types for yca

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for yca
#[derive(Debug, Error)]
pub enum YcaError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Delimited comment file error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Sentiment lexicon could not be installed or loaded
    #[error("Sentiment lexicon unavailable at {path}: {reason}")]
    LexiconUnavailable { path: PathBuf, reason: String },

    /// Sentiment lexicon contains a malformed entry
    #[error("Malformed lexicon entry on line {line}: {message}")]
    LexiconParse { line: usize, message: String },

    /// Not a recognisable video link or id
    #[error("Invalid video link or id: {0}")]
    InvalidVideoId(String),

    /// Video does not exist on the platform
    #[error("Video not found: {0}")]
    VideoNotFound(String),

    /// Platform API key not configured
    #[error("API key missing: set the {0} environment variable")]
    MissingApiKey(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Platform API returned an error response
    #[error("Platform API error ({status}): {message}")]
    Platform { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<YcaError>,
    },
}

impl YcaError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        YcaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this is a lexicon setup failure (fatal for analysis)
    pub fn is_setup_failure(&self) -> bool {
        match self {
            YcaError::LexiconUnavailable { .. } | YcaError::LexiconParse { .. } => true,
            YcaError::WithContext { source, .. } => source.is_setup_failure(),
            _ => false,
        }
    }
}

/// Result type alias for yca
pub type Result<T> = std::result::Result<T, YcaError>;
