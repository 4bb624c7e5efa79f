use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CtxError {
    // IO-related errors
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read from stdin")]
    StdinRead(#[from] std::io::Error),

    #[error("Failed to serialize report")]
    JsonSerialize(#[from] serde_json::Error),

    // Environment-related errors
    #[error("Claude data directory not found")]
    ClaudePathNotFound,

    #[error("No transcript found for '{query}'")]
    SessionNotFound { query: String },

    #[error("No transcripts found under the Claude projects directories")]
    NoTranscripts,

    #[error("Standard input ('-') can only be given once")]
    StdinRepeated,

    #[error("Unknown pricing tier '{tier}' (available: {available})")]
    UnknownPricingTier { tier: String, available: String },

    // Async / parallel processing
    #[error("Task failed")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed to configure thread pool")]
    ThreadPoolInit(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, CtxError>;
