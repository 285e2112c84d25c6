// crates/core/src/lib.rs
//! Fixed-capacity word frequency engine.
//!
//! Input bytes are normalized (ASCII letters lowered, everything else turned
//! into a separator), every alphabetic run is hashed with a seeded CRC-32, and
//! the hash is recorded in a [`table::FingerprintTable`]: `2^order` buckets of
//! `slots` fingerprint/counter pairs. Spellings are stored once in a
//! [`arena::WordArena`] and linked to their slot through a
//! [`arena::WordIndex`]. The table never grows; a bucket overflow means the
//! `(seed, order, slots)` configuration does not fit the corpus.
#![no_std]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod arena;
pub mod config;
pub mod counter;
pub mod error;
pub mod hasher;
pub mod normalize;
pub mod rank;
pub mod table;

pub use config::{CollisionPolicy, CountConfig};
pub use counter::{CountSummary, WordCounter};
pub use error::{CoreError, Result};
pub use rank::{RankEntry, RankSink};
