use std::io;

use thiserror::Error;

/// Library-wide error type for labquote operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Quote draft file could not be parsed.
    #[error("Failed to parse draft '{path}': {details}")]
    DraftParse { path: String, details: String },

    /// Quote draft file has an extension we do not recognize.
    #[error("Unsupported draft format '{0}': expected .yml, .yaml, or .json")]
    UnsupportedDraftFormat(String),

    /// Price table file is malformed.
    #[error("Invalid price table: {0}")]
    InvalidPriceTable(String),

    /// The quote failed field or formula validation.
    #[error("Quote has {count} validation error(s)")]
    ValidationFailed { count: usize },

    /// Submission attempted without a completed verification challenge.
    #[error("Verification token is missing. Complete the challenge and retry.")]
    MissingVerification,

    /// The gateway rejected the submission or the transport failed.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Order summary rendering failed.
    #[error("Failed to render summary: {0}")]
    SummaryRender(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
