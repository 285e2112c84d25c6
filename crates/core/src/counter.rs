// crates/core/src/counter.rs
use alloc::vec::Vec;

use crate::config::CountConfig;
use crate::error::{CoreError, Result};
use crate::hasher::RunHasher;
use crate::normalize::{self, SEPARATOR};
use crate::rank::{self, RankEntry};
use crate::table::FingerprintTable;

/// Totals of a counting session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CountSummary {
    /// Input bytes scanned.
    pub bytes: usize,
    /// Word occurrences (maximal letter runs).
    pub words: u64,
    /// Distinct words stored.
    pub distinct: usize,
    /// Counters stuck at `u32::MAX`.
    pub saturated: usize,
    /// Arena bytes in use, reserved byte included.
    pub arena_used: usize,
    /// `distinct / (buckets * slots)`.
    pub load_factor: f64,
}

/// A counting session: one table and its arena.
///
/// Every call to [`WordCounter::count`] adds to the same table; a run never
/// spans two calls. [`WordCounter::reset`] returns to the initial state.
#[derive(Debug, Clone)]
pub struct WordCounter {
    config: CountConfig,
    table: FingerprintTable,
    scratch: Vec<u8>,
    bytes: usize,
    words: u64,
}

impl WordCounter {
    /// # Errors
    ///
    /// [`CoreError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: CountConfig) -> Result<Self> {
        let table = FingerprintTable::new(&config)?;
        Ok(Self {
            config,
            table,
            scratch: Vec::new(),
            bytes: 0,
            words: 0,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &CountConfig {
        &self.config
    }

    #[must_use]
    pub const fn table(&self) -> &FingerprintTable {
        &self.table
    }

    /// Counts the words of `input`, leaving it untouched.
    ///
    /// # Errors
    ///
    /// See [`WordCounter::count_in_place`].
    pub fn count(&mut self, input: &[u8]) -> Result<()> {
        self.check_size(input.len())?;
        let mut scratch = core::mem::take(&mut self.scratch);
        scratch.clear();
        scratch.extend_from_slice(input);
        let result = self.count_in_place(&mut scratch);
        self.scratch = scratch;
        result
    }

    /// Normalizes `input` in place, then counts its words.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InputTooLarge`] if the session would exceed `max_input_size`.
    /// - Any capacity violation raised by the table or the arena. Occurrences
    ///   recorded before the failure stay in the table.
    pub fn count_in_place(&mut self, input: &mut [u8]) -> Result<()> {
        self.check_size(input.len())?;
        normalize::normalize_in_place(input);
        self.count_normalized(input)
    }

    /// Counts an already normalized buffer (see [`normalize::normalize_in_place`]).
    ///
    /// # Errors
    ///
    /// Same as [`WordCounter::count_in_place`].
    pub fn count_normalized(&mut self, input: &[u8]) -> Result<()> {
        self.check_size(input.len())?;
        self.bytes += input.len();
        let mut run_start = None;
        for (pos, &byte) in input.iter().enumerate() {
            if byte != SEPARATOR {
                if run_start.is_none() {
                    run_start = Some(pos);
                }
            } else if let Some(start) = run_start.take() {
                self.end_run(&input[start..pos])?;
            }
        }
        if let Some(start) = run_start {
            self.end_run(&input[start..])?;
        }
        Ok(())
    }

    /// Occurrences of `word` (matched case-insensitively), 0 if never seen or
    /// if `word` is not a single run of letters.
    #[must_use]
    pub fn count_of(&self, word: &[u8]) -> u32 {
        if word.is_empty() || !word.iter().copied().all(normalize::is_word_byte) {
            return 0;
        }
        let lowered: Vec<u8> = word.iter().map(u8::to_ascii_lowercase).collect();
        let hash = RunHasher::hash_run(self.config.seed, &lowered);
        self.table
            .find(hash, &lowered)
            .map_or(0, |(bucket, slot)| self.table.count_at(bucket, slot))
    }

    /// Ranked `(count, word)` entries borrowed from the arena.
    ///
    /// # Errors
    ///
    /// See [`rank::ranked`].
    pub fn ranked(&self) -> Result<Vec<RankEntry<'_>>> {
        rank::ranked(&self.table)
    }

    #[must_use]
    pub fn summary(&self) -> CountSummary {
        CountSummary {
            bytes: self.bytes,
            words: self.words,
            distinct: self.table.distinct(),
            saturated: self.table.saturated(),
            arena_used: self.table.arena().len(),
            load_factor: self.table.load_factor(),
        }
    }

    /// Forgets every word; the allocation is kept.
    pub fn reset(&mut self) {
        self.table.reset();
        self.bytes = 0;
        self.words = 0;
    }

    fn check_size(&self, len: usize) -> Result<()> {
        let size = self.bytes.saturating_add(len);
        if size > self.config.max_input_size {
            return Err(CoreError::InputTooLarge {
                size,
                max: self.config.max_input_size,
            });
        }
        Ok(())
    }

    fn end_run(&mut self, run: &[u8]) -> Result<()> {
        let hash = RunHasher::hash_run(self.config.seed, run);
        self.table.record_occurrence(hash, run)?;
        self.words += 1;
        Ok(())
    }
}
