// crates/engine/src/seed_search.rs
//! Offline search for seeds under which a corpus fits the table.
//!
//! Under a valid seed every distinct word of the corpus lands on its own
//! `(bucket, fingerprint)` pair and no bucket receives more than `slots`
//! words, so counting that corpus needs neither probing nor spelling checks.

use crate::error::{EngineError, Result};
use hashbrown::HashSet;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use wordfreq_core::config::{MAX_ORDER, MAX_SLOTS};
use wordfreq_core::hasher::RunHasher;
use wordfreq_core::normalize::{normalize_in_place, runs};
use wordfreq_core::table::FINGERPRINT_MASK;

/// Seeds tested per parallel round.
const SEEDS_PER_ROUND: u32 = 1 << 14;

/// A seed that separates every word of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCandidate {
    pub seed: u32,
    pub order: u32,
    pub slots: usize,
    /// Largest number of words sharing one bucket.
    pub max_load: usize,
}

#[derive(Debug, Clone)]
pub struct SeedSearch {
    order: u32,
    slots: usize,
    seeds: RangeInclusive<u32>,
    limit: usize,
}

impl SeedSearch {
    /// # Errors
    ///
    /// [`EngineError::Config`] when `order`, `slots` or `limit` is out of range
    /// or `seeds` is empty.
    pub fn new(order: u32, slots: usize, seeds: RangeInclusive<u32>, limit: usize) -> Result<Self> {
        if order == 0 || order > MAX_ORDER {
            return Err(EngineError::Config(format!(
                "order must be between 1 and {MAX_ORDER}, got {order}"
            )));
        }
        if slots == 0 || slots > MAX_SLOTS {
            return Err(EngineError::Config(format!(
                "slots must be between 1 and {MAX_SLOTS}, got {slots}"
            )));
        }
        if seeds.is_empty() {
            return Err(EngineError::Config(format!(
                "empty seed range {}..={}",
                seeds.start(),
                seeds.end()
            )));
        }
        if limit == 0 {
            return Err(EngineError::Config("limit must be positive".into()));
        }
        Ok(Self {
            order,
            slots,
            seeds,
            limit,
        })
    }

    /// Runs the search on the calling rayon pool.
    ///
    /// Candidates come back in ascending seed order; at most `limit` of them.
    #[must_use]
    pub fn run(&self, words: &[Vec<u8>]) -> Vec<SeedCandidate> {
        if words.len() > self.capacity() {
            log::warn!(
                "{} distinct words cannot fit {} buckets of {} slots",
                words.len(),
                1usize << self.order,
                self.slots
            );
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut next = Some(*self.seeds.start());
        let last = *self.seeds.end();
        while let Some(first) = next {
            let end = first.saturating_add(SEEDS_PER_ROUND - 1).min(last);
            let round: Vec<SeedCandidate> = (first..=end)
                .into_par_iter()
                .map_init(
                    || Vec::with_capacity(words.len()),
                    |keys, seed| self.check(seed, words, keys),
                )
                .flatten()
                .collect();
            for candidate in round {
                log::info!(
                    "found seed {} (max load {} of {})",
                    candidate.seed,
                    candidate.max_load,
                    self.slots
                );
                found.push(candidate);
                if found.len() == self.limit {
                    return found;
                }
            }
            log::debug!("seeds {first}..={end} checked, {} found", found.len());
            next = end.checked_add(1).filter(|_| end < last);
        }
        found
    }

    /// Tests one seed. `keys` is scratch space reused across seeds.
    #[must_use]
    pub fn check(&self, seed: u32, words: &[Vec<u8>], keys: &mut Vec<u64>) -> Option<SeedCandidate> {
        let bucket_mask = (1u32 << self.order) - 1;
        keys.clear();
        keys.extend(words.iter().map(|word| {
            let hash = RunHasher::hash_run(seed, word);
            let bucket = u64::from(hash & bucket_mask);
            let fingerprint = u64::from((hash >> self.order) & FINGERPRINT_MASK);
            (bucket << 15) | fingerprint
        }));
        keys.sort_unstable();

        let mut max_load = 0;
        let mut load = 0;
        let mut previous: Option<u64> = None;
        for &key in keys.iter() {
            match previous {
                Some(p) if p == key => return None,
                Some(p) if p >> 15 == key >> 15 => load += 1,
                _ => load = 1,
            }
            if load > self.slots {
                return None;
            }
            max_load = max_load.max(load);
            previous = Some(key);
        }
        Some(SeedCandidate {
            seed,
            order: self.order,
            slots: self.slots,
            max_load,
        })
    }

    const fn capacity(&self) -> usize {
        (1usize << self.order) * self.slots
    }
}

/// Distinct normalized words of `input`, shortest first.
#[must_use]
pub fn distinct_words(input: &[u8]) -> Vec<Vec<u8>> {
    let mut normalized = input.to_vec();
    normalize_in_place(&mut normalized);
    let unique: HashSet<&[u8]> = runs(&normalized).collect();
    let mut words: Vec<Vec<u8>> = unique.into_iter().map(<[u8]>::to_vec).collect();
    // short words first: collisions among them show up early
    words.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    words
}
