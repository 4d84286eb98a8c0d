//! Error types for the fallible edges of the crate.
//!
//! Field extraction itself never fails; a pattern that does not match just
//! leaves the field absent. Errors only come from reading inputs, decoding
//! MIME messages, JSON handling and batch thread-pool setup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading, decoding or batch-parsing lead emails.
#[derive(Debug, Error)]
pub enum LeadParserError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input `{label}` is {size} bytes, above the {limit} byte limit")]
    InputTooLarge {
        label: String,
        size: usize,
        limit: usize,
    },
    #[error("failed to parse MIME structure: {0}")]
    Mime(#[from] mailparse::MailParseError),
    #[error("invalid lead JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to create thread pool: {0}")]
    ThreadPool(String),
}

impl LeadParserError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LeadParserError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for lead-parser operations that can fail.
pub type Result<T> = std::result::Result<T, LeadParserError>;
