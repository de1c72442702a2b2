use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

/// Seeded randomness used for key draws and encryption noise.
pub struct Source {
    source: ChaCha8Rng,
}

/// Draws a fresh 32 byte seed from the thread-local OS-seeded generator.
pub fn new_seed() -> [u8; 32] {
    rand::random()
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn from_entropy() -> Source {
        Source::new(new_seed())
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Returns an integer drawn uniformly from \[-bound, bound\].
    ///
    /// `bound` must not exceed `i64::MAX / 2`.
    #[inline(always)]
    pub fn next_i64_bounded(&mut self, bound: u64) -> i64 {
        debug_assert!(bound <= (i64::MAX as u64) >> 1, "invalid bound: {} > i64::MAX/2", bound);
        if bound == 0 {
            return 0;
        }
        let span: u64 = 2 * bound + 1;
        let mask: u64 = span.next_power_of_two() - 1;
        self.next_u64n(span, mask) as i64 - bound as i64
    }

    /// Returns `bits` uniform random bits as a big-endian byte string of
    /// `bits.div_ceil(8)` bytes. Unused high bits of the first byte are zero.
    pub fn next_bits(&mut self, bits: u32) -> Vec<u8> {
        let len: usize = bits.div_ceil(8) as usize;
        let mut bytes: Vec<u8> = vec![0u8; len];
        self.fill_bytes(&mut bytes);
        let rem: u32 = bits % 8;
        if rem != 0 {
            bytes[0] &= (1u8 << rem) - 1;
        }
        bytes
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
