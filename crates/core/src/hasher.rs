use crc32fast::Hasher;

/// Seeded CRC-32 over the bytes of the current run.
///
/// The checksum starts from the configured seed at every run boundary, so the
/// hash of a word depends only on its (lowered) bytes and the seed.
#[derive(Debug, Clone)]
pub struct RunHasher {
    seed: u32,
    state: Hasher,
    len: usize,
}

impl RunHasher {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            state: Hasher::new_with_initial(seed),
            len: 0,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Bytes folded into the current run so far.
    #[must_use]
    pub const fn run_len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.state.update(&[byte]);
        self.len += 1;
    }

    #[inline]
    pub fn extend(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
        self.len += bytes.len();
    }

    /// Ends the run: returns its checksum and re-seeds for the next one.
    #[inline]
    pub fn finish(&mut self) -> u32 {
        let state = core::mem::replace(&mut self.state, Hasher::new_with_initial(self.seed));
        self.len = 0;
        state.finalize()
    }

    /// Checksum of a whole run in one call.
    #[must_use]
    pub fn hash_run(seed: u32, run: &[u8]) -> u32 {
        let mut state = Hasher::new_with_initial(seed);
        state.update(run);
        state.finalize()
    }
}
