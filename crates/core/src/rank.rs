use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::Result;
use crate::table::FingerprintTable;

/// One distinct word and its number of occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEntry<'a> {
    pub count: u32,
    pub word: &'a [u8],
}

impl RankEntry<'_> {
    /// The word as text. Stored spellings are lowercase ASCII, so this never fails
    /// for entries produced by [`ranked`].
    #[must_use]
    pub fn word_str(&self) -> &str {
        core::str::from_utf8(self.word).unwrap_or_default()
    }
}

/// Receives ranked entries in order.
pub trait RankSink {
    type Error;

    /// # Errors
    ///
    /// Whatever the sink fails with; emission stops at the first error.
    fn emit(&mut self, entry: &RankEntry<'_>) -> core::result::Result<(), Self::Error>;
}

/// Writes the canonical `"<count> <word>\n"` lines into any [`core::fmt::Write`].
#[derive(Debug, Default)]
pub struct FmtSink<W>(pub W);

impl<W: core::fmt::Write> RankSink for FmtSink<W> {
    type Error = core::fmt::Error;

    fn emit(&mut self, entry: &RankEntry<'_>) -> core::fmt::Result {
        writeln!(self.0, "{} {}", entry.count, entry.word_str())
    }
}

/// Count descending, then word ascending.
#[must_use]
pub fn rank_order(a: &RankEntry<'_>, b: &RankEntry<'_>) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(b.word))
}

/// Collects every occupied slot and sorts it by [`rank_order`].
///
/// # Errors
///
/// [`crate::CoreError::OffsetOutOfBounds`] if a slot points outside the arena,
/// which only happens if the table was corrupted.
pub fn ranked(table: &FingerprintTable) -> Result<Vec<RankEntry<'_>>> {
    let mut entries = Vec::with_capacity(table.distinct());
    for (bucket, slot, count) in table.occupied() {
        let word = table.arena().word(table.index().get(bucket, slot))?;
        entries.push(RankEntry { count, word });
    }
    // words are unique, so the order is total and stability does not matter
    entries.sort_unstable_by(rank_order);
    Ok(entries)
}

/// Hands `entries` to `sink` in order.
///
/// # Errors
///
/// The first error returned by the sink.
pub fn emit<S: RankSink>(entries: &[RankEntry<'_>], sink: &mut S) -> core::result::Result<(), S::Error> {
    entries.iter().try_for_each(|entry| sink.emit(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountConfig;
    use alloc::string::String;

    fn table_with(words: &[(&str, u32)]) -> FingerprintTable {
        let mut table = FingerprintTable::new(&CountConfig {
            order: 4,
            arena_capacity: 1 << 10,
            ..CountConfig::default()
        })
        .unwrap();
        for (i, (word, count)) in words.iter().enumerate() {
            // distinct hashes: bucket i, fingerprint i
            let hash = (i as u32) | ((i as u32) << 4);
            for _ in 0..*count {
                table.record_occurrence(hash, word.as_bytes()).unwrap();
            }
        }
        table
    }

    #[test]
    fn orders_by_count_then_word() {
        let table = table_with(&[("sat", 1), ("the", 3), ("mat", 1), ("cat", 2), ("on", 1)]);
        let entries = ranked(&table).unwrap();
        let words: alloc::vec::Vec<(&[u8], u32)> =
            entries.iter().map(|e| (e.word, e.count)).collect();
        assert_eq!(
            words,
            [
                (&b"the"[..], 3),
                (&b"cat"[..], 2),
                (&b"mat"[..], 1),
                (&b"on"[..], 1),
                (&b"sat"[..], 1),
            ]
        );
    }

    #[test]
    fn empty_table_ranks_nothing() {
        let table = table_with(&[]);
        assert!(ranked(&table).unwrap().is_empty());
    }

    #[test]
    fn fmt_sink_writes_count_word_lines() {
        let table = table_with(&[("b", 1), ("a", 1), ("c", 4)]);
        let entries = ranked(&table).unwrap();
        let mut sink = FmtSink(String::new());
        emit(&entries, &mut sink).unwrap();
        assert_eq!(sink.0, "4 c\n1 a\n1 b\n");
    }
}
