// crates/engine/src/error.rs
use std::path::PathBuf;

use thiserror::Error;
use wordfreq_core::CoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read input '{path}': {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read configuration '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Verification failed: {mismatches} word(s) differ from the reference count (first: {first})")]
    Verification { mismatches: usize, first: String },
}

impl EngineError {
    /// Whether the error means the counting configuration cannot hold the corpus.
    #[must_use]
    pub fn is_capacity_violation(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_capacity_violation())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
