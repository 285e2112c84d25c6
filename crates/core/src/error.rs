use alloc::string::String;
use thiserror::Error;

/// Errors raised by the counting engine.
///
/// Capacity errors are not recoverable: they mean the configured
/// `(seed, order, slots, arena_capacity)` cannot represent the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("bucket {bucket} is full: more than {slots} distinct words share its index")]
    BucketFull { bucket: usize, slots: usize },

    #[error("table is full: linear probing visited all {buckets} buckets")]
    TableFull { buckets: usize },

    #[error("word arena is full: {needed} bytes needed, {remaining} of {capacity} remaining")]
    ArenaFull {
        needed: usize,
        remaining: usize,
        capacity: usize,
    },

    #[error("input of {size} bytes exceeds the maximum of {max} bytes")]
    InputTooLarge { size: usize, max: usize },

    #[error("arena offset {offset} is out of bounds (arena holds {len} bytes)")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Whether this error reports that the configuration cannot hold the corpus.
    #[must_use]
    pub const fn is_capacity_violation(&self) -> bool {
        matches!(
            self,
            Self::BucketFull { .. } | Self::TableFull { .. } | Self::ArenaFull { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, CoreError>;
