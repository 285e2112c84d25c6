//! Fixed-size fingerprint table.
//!
//! The low `order` bits of a run's hash select a bucket; the next 15 bits are
//! the fingerprint stored in one of the bucket's `slots`. Counters live next to
//! the fingerprints, spellings live in the [`WordArena`] and are linked through
//! the [`WordIndex`]. Nothing is ever removed or rehashed.

use alloc::vec;
use alloc::vec::Vec;

use crate::arena::{WordArena, WordIndex};
use crate::config::{CollisionPolicy, CountConfig};
use crate::error::{CoreError, Result};

/// Fingerprint of an unused slot.
pub const EMPTY: u16 = 0xFFFF;

/// Fingerprints keep 15 bits so that no hash can produce [`EMPTY`].
pub const FINGERPRINT_MASK: u32 = 0x7FFF;

/// Whether a recorded run was new to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    FirstSight,
    Repeat,
}

/// Where a run was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    pub bucket: usize,
    pub slot: usize,
    pub occurrence: Occurrence,
}

/// Outcome of looking a run up in one bucket.
enum Scan {
    Found(usize),
    Free(usize),
    Full,
}

/// Read-only view of one bucket.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    fingerprints: &'a [u16],
    counts: &'a [u32],
}

impl<'a> Chunk<'a> {
    #[must_use]
    pub const fn fingerprints(&self) -> &'a [u16] {
        self.fingerprints
    }

    #[must_use]
    pub const fn counts(&self) -> &'a [u32] {
        self.counts
    }

    /// Number of slots in use.
    #[must_use]
    pub fn load(&self) -> usize {
        self.fingerprints.iter().filter(|&&fp| fp != EMPTY).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.fingerprints.contains(&EMPTY)
    }
}

#[derive(Debug, Clone)]
pub struct FingerprintTable {
    order: u32,
    slots: usize,
    policy: CollisionPolicy,
    fingerprints: Vec<u16>,
    counts: Vec<u32>,
    index: WordIndex,
    arena: WordArena,
    distinct: usize,
    saturated: usize,
}

impl FingerprintTable {
    /// Allocates an empty table and arena sized by `config`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: &CountConfig) -> Result<Self> {
        config.validate()?;
        let cells = config.capacity();
        Ok(Self {
            order: config.order,
            slots: config.slots,
            policy: config.policy,
            fingerprints: vec![EMPTY; cells],
            counts: vec![0; cells],
            index: WordIndex::new(config.buckets(), config.slots),
            arena: WordArena::with_capacity(config.arena_capacity),
            distinct: 0,
            saturated: 0,
        })
    }

    /// Splits a hash into `(bucket, fingerprint)`.
    #[inline]
    #[must_use]
    pub const fn split(&self, hash: u32) -> (usize, u16) {
        let bucket = (hash & self.bucket_mask()) as usize;
        let fingerprint = ((hash >> self.order) & FINGERPRINT_MASK) as u16;
        (bucket, fingerprint)
    }

    /// Counts one occurrence of `run`, whose hash is `hash`.
    ///
    /// `run` must already be normalized; it is copied into the arena on first sight.
    ///
    /// # Errors
    ///
    /// - [`CoreError::BucketFull`] under [`CollisionPolicy::Fatal`] when the bucket has no free slot.
    /// - [`CoreError::TableFull`] under [`CollisionPolicy::LinearProbing`] when every bucket was probed.
    /// - [`CoreError::ArenaFull`] when the spelling does not fit.
    pub fn record_occurrence(&mut self, hash: u32, run: &[u8]) -> Result<SlotRef> {
        let (mut bucket, fingerprint) = self.split(hash);
        let buckets = self.buckets();
        for _ in 0..buckets {
            match self.scan(bucket, fingerprint, run) {
                Scan::Found(slot) => {
                    self.bump(bucket * self.slots + slot);
                    return Ok(SlotRef {
                        bucket,
                        slot,
                        occurrence: Occurrence::Repeat,
                    });
                }
                Scan::Free(slot) => {
                    self.claim(bucket, slot, fingerprint, run)?;
                    return Ok(SlotRef {
                        bucket,
                        slot,
                        occurrence: Occurrence::FirstSight,
                    });
                }
                Scan::Full if self.policy == CollisionPolicy::Fatal => {
                    return Err(CoreError::BucketFull {
                        bucket,
                        slots: self.slots,
                    });
                }
                Scan::Full => bucket = (bucket + 1) & (buckets - 1),
            }
        }
        Err(CoreError::TableFull { buckets })
    }

    /// Looks a run up without modifying the table, following the same probe sequence.
    #[must_use]
    pub fn find(&self, hash: u32, run: &[u8]) -> Option<(usize, usize)> {
        let (mut bucket, fingerprint) = self.split(hash);
        let buckets = self.buckets();
        for _ in 0..buckets {
            match self.scan(bucket, fingerprint, run) {
                Scan::Found(slot) => return Some((bucket, slot)),
                Scan::Free(_) => return None,
                Scan::Full if self.policy == CollisionPolicy::Fatal => return None,
                Scan::Full => bucket = (bucket + 1) & (buckets - 1),
            }
        }
        None
    }

    /// Counter of the slot at `(bucket, slot)`.
    #[must_use]
    pub fn count_at(&self, bucket: usize, slot: usize) -> u32 {
        self.counts[bucket * self.slots + slot]
    }

    #[must_use]
    pub fn chunk(&self, bucket: usize) -> Chunk<'_> {
        let start = bucket * self.slots;
        Chunk {
            fingerprints: &self.fingerprints[start..start + self.slots],
            counts: &self.counts[start..start + self.slots],
        }
    }

    /// Occupied slots in table order as `(bucket, slot, count)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let slots = self.slots;
        self.fingerprints
            .iter()
            .zip(&self.counts)
            .enumerate()
            .filter(|(_, (fp, _))| **fp != EMPTY)
            .map(move |(cell, (_, &count))| (cell / slots, cell % slots, count))
    }

    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub const fn buckets(&self) -> usize {
        1 << self.order
    }

    #[must_use]
    pub const fn slots(&self) -> usize {
        self.slots
    }

    #[must_use]
    pub const fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Number of distinct words stored.
    #[must_use]
    pub const fn distinct(&self) -> usize {
        self.distinct
    }

    /// Number of counters that reached `u32::MAX`.
    #[must_use]
    pub const fn saturated(&self) -> usize {
        self.saturated
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.distinct as f64 / self.fingerprints.len() as f64
    }

    #[must_use]
    pub const fn arena(&self) -> &WordArena {
        &self.arena
    }

    #[must_use]
    pub const fn index(&self) -> &WordIndex {
        &self.index
    }

    /// Restores the freshly allocated state.
    pub fn reset(&mut self) {
        self.fingerprints.fill(EMPTY);
        self.counts.fill(0);
        self.index.clear();
        self.arena.clear();
        self.distinct = 0;
        self.saturated = 0;
    }

    const fn bucket_mask(&self) -> u32 {
        (1 << self.order) - 1
    }

    fn bucket_fingerprints(&self, bucket: usize) -> &[u16] {
        let start = bucket * self.slots;
        &self.fingerprints[start..start + self.slots]
    }

    /// Slot of `run` in `bucket`, else the bucket's first free slot.
    ///
    /// Under linear probing every fingerprint twin in the bucket is checked
    /// against the stored spelling before a free slot is taken.
    fn scan(&self, bucket: usize, fingerprint: u16, run: &[u8]) -> Scan {
        let fingerprints = self.bucket_fingerprints(bucket);
        let found = match self.policy {
            CollisionPolicy::Fatal => first_match(fingerprints, fingerprint),
            CollisionPolicy::LinearProbing => fingerprints
                .iter()
                .enumerate()
                .filter(|&(_, &fp)| fp == fingerprint)
                .map(|(slot, _)| slot)
                .find(|&slot| self.spelled_as(bucket, slot, run)),
        };
        match found {
            Some(slot) => Scan::Found(slot),
            None => first_match(fingerprints, EMPTY).map_or(Scan::Full, Scan::Free),
        }
    }

    fn spelled_as(&self, bucket: usize, slot: usize, run: &[u8]) -> bool {
        self.arena
            .word(self.index.get(bucket, slot))
            .is_ok_and(|word| word == run)
    }

    fn claim(&mut self, bucket: usize, slot: usize, fingerprint: u16, run: &[u8]) -> Result<()> {
        let offset = self.arena.append(run)?;
        self.index.set(bucket, slot, offset);
        let cell = bucket * self.slots + slot;
        self.fingerprints[cell] = fingerprint;
        self.counts[cell] = 1;
        self.distinct += 1;
        Ok(())
    }

    fn bump(&mut self, cell: usize) {
        let count = &mut self.counts[cell];
        if *count == u32::MAX {
            return;
        }
        *count += 1;
        if *count == u32::MAX {
            self.saturated += 1;
            log::warn!(
                "counter of bucket {} slot {} saturated at {}",
                cell / self.slots,
                cell % self.slots,
                u32::MAX
            );
        }
    }
}

/// First slot whose fingerprint equals `needle`, in slot order.
#[inline]
fn first_match(fingerprints: &[u16], needle: u16) -> Option<usize> {
    #[cfg(target_arch = "x86_64")]
    {
        if fingerprints.len() == sse2::LANES {
            // SAFETY: sse2 is part of the x86_64 baseline and the slice holds exactly 8 lanes.
            return unsafe { sse2::first_match(fingerprints, needle) };
        }
    }
    fingerprints.iter().position(|&fp| fp == needle)
}

#[cfg(target_arch = "x86_64")]
mod sse2 {
    use core::arch::x86_64::{
        __m128i, _mm_cmpeq_epi16, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi16,
    };

    pub(super) const LANES: usize = 8;

    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn first_match(fingerprints: &[u16], needle: u16) -> Option<usize> {
        debug_assert_eq!(fingerprints.len(), LANES);
        let mask = unsafe {
            let lanes = _mm_loadu_si128(fingerprints.as_ptr().cast::<__m128i>());
            let equal = _mm_cmpeq_epi16(lanes, _mm_set1_epi16(needle as i16));
            _mm_movemask_epi8(equal) as u32
        };
        // two mask bits per 16-bit lane
        (mask != 0).then(|| mask.trailing_zeros() as usize / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(order: u32, slots: usize, policy: CollisionPolicy) -> CountConfig {
        CountConfig {
            order,
            slots,
            arena_capacity: 1 << 12,
            policy,
            ..CountConfig::default()
        }
    }

    /// Hash whose bucket is `bucket` and fingerprint is `fingerprint` for the given order.
    fn hash(order: u32, bucket: u32, fingerprint: u32) -> u32 {
        bucket | (fingerprint << order)
    }

    #[test]
    fn split_never_yields_empty() {
        let table = FingerprintTable::new(&config(1, 2, CollisionPolicy::Fatal)).unwrap();
        let (bucket, fingerprint) = table.split(u32::MAX);
        assert_eq!(bucket, 1);
        assert_eq!(fingerprint, 0x7FFF);
        assert_ne!(fingerprint, EMPTY);
    }

    #[test]
    fn first_match_agrees_with_position() {
        let lanes = [3u16, EMPTY, 7, 3, EMPTY, 9, 0x7FFF, 1];
        for needle in [0u16, 1, 3, 7, 9, 0x7FFF, EMPTY, 42] {
            assert_eq!(
                first_match(&lanes, needle),
                lanes.iter().position(|&fp| fp == needle)
            );
        }
        assert_eq!(first_match(&lanes[..3], EMPTY), Some(1));
    }

    #[test]
    fn first_sight_then_repeat() {
        let mut table = FingerprintTable::new(&config(4, 8, CollisionPolicy::Fatal)).unwrap();
        let h = hash(4, 3, 17);
        let first = table.record_occurrence(h, b"cat").unwrap();
        assert_eq!(first.occurrence, Occurrence::FirstSight);
        let again = table.record_occurrence(h, b"cat").unwrap();
        assert_eq!(again.occurrence, Occurrence::Repeat);
        assert_eq!((again.bucket, again.slot), (3, 0));
        assert_eq!(table.count_at(3, 0), 2);
        assert_eq!(table.distinct(), 1);
        assert_eq!(table.arena().word(table.index().get(3, 0)).unwrap(), b"cat");
    }

    #[test]
    fn slots_fill_in_order() {
        let mut table = FingerprintTable::new(&config(2, 3, CollisionPolicy::Fatal)).unwrap();
        for (fp, word) in [(5, b"a"), (6, b"b"), (7, b"c")] {
            table.record_occurrence(hash(2, 1, fp), word).unwrap();
        }
        let chunk = table.chunk(1);
        assert_eq!(chunk.fingerprints(), &[5, 6, 7]);
        assert_eq!(chunk.counts(), &[1, 1, 1]);
        assert!(chunk.is_full());
        assert_eq!(table.chunk(0).load(), 0);
    }

    #[test]
    fn full_bucket_is_fatal() {
        let mut table = FingerprintTable::new(&config(3, 2, CollisionPolicy::Fatal)).unwrap();
        table.record_occurrence(hash(3, 5, 1), b"one").unwrap();
        table.record_occurrence(hash(3, 5, 2), b"two").unwrap();
        let err = table.record_occurrence(hash(3, 5, 3), b"three").unwrap_err();
        assert_eq!(err, CoreError::BucketFull { bucket: 5, slots: 2 });
        assert!(err.is_capacity_violation());
        // the words already counted are untouched
        assert_eq!(table.distinct(), 2);
    }

    #[test]
    fn eight_slot_scan_matches_any_lane() {
        let mut table = FingerprintTable::new(&config(2, 8, CollisionPolicy::Fatal)).unwrap();
        for fp in 0..8u32 {
            table.record_occurrence(hash(2, 0, fp), &[b'a' + fp as u8]).unwrap();
        }
        let last = table.record_occurrence(hash(2, 0, 7), b"h").unwrap();
        assert_eq!(last.slot, 7);
        assert_eq!(last.occurrence, Occurrence::Repeat);
        assert!(matches!(
            table.record_occurrence(hash(2, 0, 8), b"i"),
            Err(CoreError::BucketFull { bucket: 0, slots: 8 })
        ));
    }

    #[test]
    fn linear_probing_moves_past_full_buckets() {
        let mut table =
            FingerprintTable::new(&config(2, 1, CollisionPolicy::LinearProbing)).unwrap();
        table.record_occurrence(hash(2, 3, 1), b"one").unwrap();
        let spilled = table.record_occurrence(hash(2, 3, 2), b"two").unwrap();
        // bucket 3 wraps around to bucket 0
        assert_eq!((spilled.bucket, spilled.slot), (0, 0));
        assert_eq!(table.find(hash(2, 3, 2), b"two"), Some((0, 0)));
    }

    #[test]
    fn linear_probing_separates_fingerprint_twins() {
        let mut table =
            FingerprintTable::new(&config(2, 2, CollisionPolicy::LinearProbing)).unwrap();
        let h = hash(2, 1, 9);
        table.record_occurrence(h, b"left").unwrap();
        let twin = table.record_occurrence(h, b"right").unwrap();
        assert_eq!(twin.occurrence, Occurrence::FirstSight);
        // same bucket, next free slot
        assert_eq!((twin.bucket, twin.slot), (1, 1));
        let again = table.record_occurrence(h, b"right").unwrap();
        assert_eq!((again.bucket, again.slot), (1, 1));
        assert_eq!(table.count_at(1, 0), 1);
        assert_eq!(table.count_at(1, 1), 2);
        assert_eq!(table.find(h, b"left"), Some((1, 0)));
        assert_eq!(table.find(h, b"right"), Some((1, 1)));
        assert_eq!(table.find(h, b"other"), None);
    }

    #[test]
    fn linear_probing_uses_free_slots_next_to_a_twin() {
        let mut table =
            FingerprintTable::new(&config(1, 2, CollisionPolicy::LinearProbing)).unwrap();
        table.record_occurrence(hash(1, 0, 1), b"a").unwrap();
        table.record_occurrence(hash(1, 0, 2), b"b").unwrap();
        // twin of "a" in a full bucket spills to bucket 1
        let c = table.record_occurrence(hash(1, 0, 1), b"c").unwrap();
        assert_eq!((c.bucket, c.slot), (1, 0));
        // "d" shares "c"'s fingerprint in bucket 1, which still has a free slot
        let d = table.record_occurrence(hash(1, 1, 1), b"d").unwrap();
        assert_eq!((d.bucket, d.slot, d.occurrence), (1, 1, Occurrence::FirstSight));
        assert_eq!(table.distinct(), 4);
        assert_eq!(table.find(hash(1, 1, 1), b"d"), Some((1, 1)));
        assert_eq!(table.find(hash(1, 0, 1), b"c"), Some((1, 0)));
        assert_eq!(
            table.record_occurrence(hash(1, 1, 3), b"e"),
            Err(CoreError::TableFull { buckets: 2 })
        );
    }

    #[test]
    fn linear_probing_reports_a_full_table() {
        let mut table =
            FingerprintTable::new(&config(1, 1, CollisionPolicy::LinearProbing)).unwrap();
        table.record_occurrence(hash(1, 0, 1), b"a").unwrap();
        table.record_occurrence(hash(1, 0, 2), b"b").unwrap();
        let err = table.record_occurrence(hash(1, 0, 3), b"c").unwrap_err();
        assert_eq!(err, CoreError::TableFull { buckets: 2 });
    }

    #[test]
    fn arena_overflow_leaves_the_slot_empty() {
        let mut table = FingerprintTable::new(&CountConfig {
            order: 2,
            slots: 2,
            arena_capacity: 6,
            ..CountConfig::default()
        })
        .unwrap();
        table.record_occurrence(hash(2, 0, 1), b"four").unwrap();
        let err = table.record_occurrence(hash(2, 0, 2), b"x").unwrap_err();
        assert!(matches!(err, CoreError::ArenaFull { .. }));
        assert_eq!(table.chunk(0).load(), 1);
    }

    #[test]
    fn counters_saturate() {
        let mut table = FingerprintTable::new(&config(1, 1, CollisionPolicy::Fatal)).unwrap();
        table.record_occurrence(0, b"w").unwrap();
        table.counts[0] = u32::MAX - 1;
        table.record_occurrence(0, b"w").unwrap();
        table.record_occurrence(0, b"w").unwrap();
        assert_eq!(table.count_at(0, 0), u32::MAX);
        assert_eq!(table.saturated(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut table = FingerprintTable::new(&config(2, 2, CollisionPolicy::Fatal)).unwrap();
        table.record_occurrence(hash(2, 1, 1), b"word").unwrap();
        table.reset();
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.occupied().count(), 0);
        assert!(table.arena().is_empty());
        assert_eq!(table.find(hash(2, 1, 1), b"word"), None);
    }
}
