//! Plain hash-map counting, used to check the fingerprint table.
//!
//! A seed that was searched on a different corpus can make two words share a
//! bucket and a fingerprint, in which case the table silently merges them.
//! Re-counting with an exact map catches that.

use crate::error::{EngineError, Result};
use hashbrown::HashMap;
use wordfreq_core::RankEntry;
use wordfreq_core::normalize::{normalize_byte, normalize_in_place, runs};
use wordfreq_core::rank::rank_order;

// set hashmap capacity to >= unique words, so we don't allocate again
const HASHMAP_INITIAL_CAPACITY: usize = 32_768;

#[derive(Debug, Default)]
pub struct ReferenceCounter {
    counts: HashMap<Vec<u8>, u64>,
    words: u64,
}

impl ReferenceCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: HashMap::with_capacity(HASHMAP_INITIAL_CAPACITY),
            words: 0,
        }
    }

    /// Counts the words of `input` with the same tokenization as the core.
    pub fn count(&mut self, input: &[u8]) {
        let mut normalized = input.to_vec();
        normalize_in_place(&mut normalized);
        for word in runs(&normalized) {
            self.words += 1;
            // entry_ref only allocates the key for a new word
            *self.counts.entry_ref(word).or_insert(0) += 1;
        }
    }

    #[must_use]
    pub fn get(&self, word: &[u8]) -> u64 {
        let lowered: Vec<u8> = word.iter().copied().map(normalize_byte).collect();
        self.counts.get(lowered.as_slice()).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub const fn words(&self) -> u64 {
        self.words
    }

    /// Ranked entries, ordered like the core ranker. Counts are clamped to `u32::MAX`.
    #[must_use]
    pub fn ranked(&self) -> Vec<RankEntry<'_>> {
        let mut entries: Vec<RankEntry<'_>> = self
            .counts
            .iter()
            .map(|(word, &count)| RankEntry {
                count: u32::try_from(count).unwrap_or(u32::MAX),
                word,
            })
            .collect();
        entries.sort_unstable_by(rank_order);
        entries
    }
}

/// Checks that `ranked` holds exactly the reference counts.
///
/// # Errors
///
/// [`EngineError::Verification`] with the number of differing words.
pub fn verify(ranked: &[RankEntry<'_>], reference: &ReferenceCounter) -> Result<()> {
    let mut mismatches = 0;
    let mut first = None;
    for entry in ranked {
        let expected = u32::try_from(reference.get(entry.word)).unwrap_or(u32::MAX);
        if expected != entry.count {
            mismatches += 1;
            first.get_or_insert_with(|| {
                format!("{}: counted {}, expected {expected}", entry.word_str(), entry.count)
            });
        }
    }
    // words the table never stored were merged into another slot
    let missing = reference.distinct().saturating_sub(ranked.len());
    if missing > 0 {
        mismatches += missing;
        first.get_or_insert_with(|| format!("{missing} word(s) missing from the table"));
    }
    match first {
        None => Ok(()),
        Some(first) => Err(EngineError::Verification { mismatches, first }),
    }
}
