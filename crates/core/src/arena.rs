use alloc::vec;
use alloc::vec::Vec;

use crate::error::{CoreError, Result};

/// Terminator written after every stored spelling.
pub const TERMINATOR: u8 = 0;

/// Offset meaning "no word"; the arena never hands it out.
pub const NO_WORD: u32 = 0;

/// Append-only store holding each distinct spelling once, in first-insertion order.
///
/// Byte 0 is reserved so that [`NO_WORD`] is never a real word start. Offsets
/// stay valid until [`WordArena::clear`].
#[derive(Debug, Clone)]
pub struct WordArena {
    bytes: Vec<u8>,
    capacity: usize,
}

impl WordArena {
    /// Creates an arena holding at most `capacity` bytes, reserved byte included.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut bytes = Vec::with_capacity(capacity.min(1 << 16));
        bytes.push(TERMINATOR);
        Self { bytes, capacity }
    }

    /// Writes `word` plus a terminator and returns the offset of its first byte.
    ///
    /// # Errors
    ///
    /// [`CoreError::ArenaFull`] if the word and its terminator do not fit.
    pub fn append(&mut self, word: &[u8]) -> Result<u32> {
        let needed = word.len() + 1;
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CoreError::ArenaFull {
                needed,
                remaining,
                capacity: self.capacity,
            });
        }
        let offset = u32::try_from(self.bytes.len()).map_err(|_| CoreError::ArenaFull {
            needed,
            remaining,
            capacity: self.capacity,
        })?;
        self.bytes.extend_from_slice(word);
        self.bytes.push(TERMINATOR);
        Ok(offset)
    }

    /// The spelling starting at `offset`, without its terminator.
    ///
    /// # Errors
    ///
    /// [`CoreError::OffsetOutOfBounds`] for [`NO_WORD`] or an offset past the write cursor.
    pub fn word(&self, offset: u32) -> Result<&[u8]> {
        let start = offset as usize;
        if offset == NO_WORD || start >= self.bytes.len() {
            return Err(CoreError::OffsetOutOfBounds {
                offset: start,
                len: self.bytes.len(),
            });
        }
        let tail = &self.bytes[start..];
        let end = tail
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(tail.len());
        Ok(&tail[..end])
    }

    /// Bytes written so far, reserved byte included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no word has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == 1
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.bytes.len())
    }

    /// Drops every word and rewinds the cursor to 1.
    pub fn clear(&mut self) {
        self.bytes.truncate(1);
    }
}

/// Arena offsets aligned slot-for-slot with the fingerprint table.
#[derive(Debug, Clone)]
pub struct WordIndex {
    offsets: Vec<u32>,
    slots: usize,
}

impl WordIndex {
    #[must_use]
    pub fn new(buckets: usize, slots: usize) -> Self {
        Self {
            offsets: vec![NO_WORD; buckets * slots],
            slots,
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, bucket: usize, slot: usize) -> u32 {
        self.offsets[bucket * self.slots + slot]
    }

    #[inline]
    pub fn set(&mut self, bucket: usize, slot: usize, offset: u32) {
        self.offsets[bucket * self.slots + slot] = offset;
    }

    /// Offsets of one bucket, in slot order.
    #[must_use]
    pub fn bucket(&self, bucket: usize) -> &[u32] {
        let start = bucket * self.slots;
        &self.offsets[start..start + self.slots]
    }

    pub fn clear(&mut self) {
        self.offsets.fill(NO_WORD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_start_after_the_reserved_byte() {
        let mut arena = WordArena::with_capacity(64);
        assert!(arena.is_empty());
        let the = arena.append(b"the").unwrap();
        let cat = arena.append(b"cat").unwrap();
        assert_eq!(the, 1);
        assert_eq!(cat, 5);
        assert_eq!(arena.word(the).unwrap(), b"the");
        assert_eq!(arena.word(cat).unwrap(), b"cat");
        assert_eq!(arena.len(), 9);
    }

    #[test]
    fn full_arena_is_reported() {
        let mut arena = WordArena::with_capacity(8);
        arena.append(b"abc").unwrap();
        let err = arena.append(b"abc").unwrap_err();
        assert_eq!(
            err,
            CoreError::ArenaFull {
                needed: 4,
                remaining: 3,
                capacity: 8
            }
        );
        // a word that still fits is accepted
        assert_eq!(arena.append(b"ab").unwrap(), 5);
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn reserved_and_stale_offsets_are_rejected() {
        let mut arena = WordArena::with_capacity(16);
        assert!(arena.word(NO_WORD).is_err());
        assert!(arena.word(3).is_err());
        arena.append(b"word").unwrap();
        arena.clear();
        assert!(arena.word(1).is_err());
        assert_eq!(arena.append(b"again").unwrap(), 1);
    }

    #[test]
    fn index_is_slot_aligned() {
        let mut index = WordIndex::new(4, 2);
        index.set(3, 1, 42);
        assert_eq!(index.get(3, 1), 42);
        assert_eq!(index.bucket(3), &[NO_WORD, 42]);
        index.clear();
        assert_eq!(index.get(3, 1), NO_WORD);
    }
}
