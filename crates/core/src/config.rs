use alloc::format;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Default bucket-index width. The 15 hash bits above a 17-bit index are
/// exactly the fingerprint.
pub const DEFAULT_ORDER: u32 = 17;
pub const DEFAULT_SLOTS: usize = 8;
pub const DEFAULT_SEED: u32 = 10675;
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1 << 29;
pub const DEFAULT_ARENA_CAPACITY: usize = 1 << 22;

pub const MAX_ORDER: u32 = 24;
pub const MAX_SLOTS: usize = 16;

/// What the table does when a bucket cannot take a new word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// A full bucket is a fatal capacity violation.
    #[default]
    Fatal,
    /// Probe the next bucket. Fingerprint hits are confirmed against the stored spelling.
    LinearProbing,
}

/// Engine configuration. `seed`, `order` and `slots` are chosen together,
/// usually by the seed search, so that no bucket sees more than `slots` words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountConfig {
    /// Bucket index width in bits; the table holds `2^order` buckets.
    pub order: u32,
    /// Slots per bucket (K).
    pub slots: usize,
    /// Initial value of the per-run checksum.
    pub seed: u32,
    pub max_input_size: usize,
    /// Bytes available for spellings, including terminators and the reserved offset 0.
    pub arena_capacity: usize,
    pub policy: CollisionPolicy,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            slots: DEFAULT_SLOTS,
            seed: DEFAULT_SEED,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            policy: CollisionPolicy::Fatal,
        }
    }
}

impl CountConfig {
    /// Number of buckets in the table.
    #[must_use]
    pub const fn buckets(&self) -> usize {
        1 << self.order
    }

    /// Total number of slots (`buckets * slots`).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buckets() * self.slots
    }

    /// Checks the ranges the table and arena rely on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.order == 0 || self.order > MAX_ORDER {
            return Err(CoreError::InvalidConfig(format!(
                "order must be between 1 and {MAX_ORDER}, got {}",
                self.order
            )));
        }
        if self.slots == 0 || self.slots > MAX_SLOTS {
            return Err(CoreError::InvalidConfig(format!(
                "slots must be between 1 and {MAX_SLOTS}, got {}",
                self.slots
            )));
        }
        // offset 0 is reserved, the smallest word needs two more bytes
        if self.arena_capacity < 3 || u32::try_from(self.arena_capacity).is_err() {
            return Err(CoreError::InvalidConfig(format!(
                "arena_capacity must be between 3 and {}, got {}",
                u32::MAX,
                self.arena_capacity
            )));
        }
        if self.max_input_size == 0 {
            return Err(CoreError::InvalidConfig(
                "max_input_size must be positive".into(),
            ));
        }
        Ok(())
    }
}
