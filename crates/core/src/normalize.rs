//! Byte classification and case folding.
//!
//! A normalized buffer holds lowercase ASCII letters and [`SEPARATOR`] bytes
//! only. [`normalize_byte`] is the reference; [`normalize_in_place`] uses SSE2
//! on `x86_64` and must agree with it for every byte value.

/// Every non-letter byte becomes this value after normalization.
pub const SEPARATOR: u8 = 0;

const LANE: usize = 16;

/// Whether `byte` is part of a word (`[A-Za-z]`).
#[inline]
#[must_use]
pub const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// Lowercases a letter, maps anything else to [`SEPARATOR`].
#[inline]
#[must_use]
pub const fn normalize_byte(byte: u8) -> u8 {
    if is_word_byte(byte) {
        byte.to_ascii_lowercase()
    } else {
        SEPARATOR
    }
}

/// Scalar normalization, kept public so the vector path can be checked against it.
pub fn normalize_scalar(buf: &mut [u8]) {
    for byte in buf {
        *byte = normalize_byte(*byte);
    }
}

/// Normalizes `buf` in place.
pub fn normalize_in_place(buf: &mut [u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        let mut blocks = buf.chunks_exact_mut(LANE);
        for block in &mut blocks {
            // SAFETY: sse2 is part of the x86_64 baseline and `block` is exactly 16 bytes.
            unsafe { sse2::normalize_block(block) };
        }
        normalize_scalar(blocks.into_remainder());
    }

    #[cfg(not(target_arch = "x86_64"))]
    normalize_scalar(buf);
}

#[cfg(target_arch = "x86_64")]
mod sse2 {
    use core::arch::x86_64::{
        __m128i, _mm_add_epi8, _mm_and_si128, _mm_andnot_si128, _mm_cmpgt_epi8, _mm_cmplt_epi8,
        _mm_loadu_si128, _mm_or_si128, _mm_set1_epi8, _mm_storeu_si128,
    };

    use super::LANE;

    /// Adds 32 to every byte below `'a'` (signed compare, so bytes >= 0x80 are
    /// shifted too), then zeroes everything outside `'a'..='z'`. Only
    /// `'A'..='Z'` can land inside that range after the shift.
    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn normalize_block(block: &mut [u8]) {
        debug_assert_eq!(block.len(), LANE);
        unsafe {
            let ptr = block.as_mut_ptr().cast::<__m128i>();
            let raw = _mm_loadu_si128(ptr);
            let below_a = _mm_cmplt_epi8(raw, _mm_set1_epi8(b'a' as i8));
            let shifted = _mm_add_epi8(
                raw,
                _mm_and_si128(below_a, _mm_set1_epi8((b'a' - b'A') as i8)),
            );
            let separator = _mm_or_si128(
                _mm_cmplt_epi8(shifted, _mm_set1_epi8(b'a' as i8)),
                _mm_cmpgt_epi8(shifted, _mm_set1_epi8(b'z' as i8)),
            );
            _mm_storeu_si128(ptr, _mm_andnot_si128(separator, shifted));
        }
    }
}

/// Iterator over the maximal word runs of a normalized buffer.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    rest: &'a [u8],
}

/// Splits a normalized buffer into its non-empty runs, in input order.
#[must_use]
pub const fn runs(normalized: &[u8]) -> Runs<'_> {
    Runs { rest: normalized }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.iter().position(|&b| b != SEPARATOR)?;
        let tail = &self.rest[start..];
        let len = tail
            .iter()
            .position(|&b| b == SEPARATOR)
            .unwrap_or(tail.len());
        let (run, rest) = tail.split_at(len);
        self.rest = rest;
        Some(run)
    }
}
