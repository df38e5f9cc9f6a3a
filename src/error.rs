use crate::corpus::Expectation;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchbenchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pre-flight check failed: pattern '{pattern}' was expected to be {expected} in '{text}'")]
    Preflight {
        text: String,
        pattern: String,
        expected: Expectation,
    },

    #[error("No corpora configured; pass --config or add [[corpus]] entries")]
    NoCorpora,

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MatchbenchError>;
