use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_SCALE: u64 = 100_000;
pub const DEFAULT_NOISE_BOUND: u64 = 10;
pub const DEFAULT_BYTE_WIDTH: usize = 32;
pub const DEFAULT_A_BITS: u32 = 120;
pub const DEFAULT_B_BITS: u32 = 120;

/// Largest supported token width, keeps `8 * byte_width` within a `u32` bit count.
pub const MAX_BYTE_WIDTH: usize = 1 << 20;

/// Engine configuration.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// document only needs to name the values it overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    /// Fixed-point scaling factor: a plaintext `m` is represented by `round(m * scale)`.
    pub scale: u64,
    /// Encryption noise is drawn uniformly from \[-noise_bound, noise_bound\].
    pub noise_bound: u64,
    /// Ciphertext width in bytes, the ring modulus is `2^(8 * byte_width)`.
    pub byte_width: usize,
    /// Bit length of the first blinding multiplier.
    pub a_bits: u32,
    /// Bit length of the second blinding multiplier.
    pub b_bits: u32,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            noise_bound: DEFAULT_NOISE_BOUND,
            byte_width: DEFAULT_BYTE_WIDTH,
            a_bits: DEFAULT_A_BITS,
            b_bits: DEFAULT_B_BITS,
        }
    }
}

impl EngineParameters {
    pub fn with_scale(mut self, scale: u64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_noise_bound(mut self, noise_bound: u64) -> Self {
        self.noise_bound = noise_bound;
        self
    }

    pub fn with_byte_width(mut self, byte_width: usize) -> Self {
        self.byte_width = byte_width;
        self
    }

    pub fn with_key_bits(mut self, a_bits: u32, b_bits: u32) -> Self {
        self.a_bits = a_bits;
        self.b_bits = b_bits;
        self
    }

    /// Base two logarithm of the ring modulus.
    pub fn log_modulus(&self) -> u32 {
        (self.byte_width * 8) as u32
    }

    /// Checks the invariants that do not depend on key material.
    ///
    /// Headroom for the blinded values is not checked here: an engine whose
    /// modulus is too small for its multipliers reports [Error::Range] on
    /// encryption instead.
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 {
            return Err(Error::InvalidParameters("scale must be > 0".into()));
        }
        if self.byte_width == 0 || self.byte_width > MAX_BYTE_WIDTH {
            return Err(Error::InvalidParameters(format!(
                "byte_width={} must lie in [1, {}]",
                self.byte_width, MAX_BYTE_WIDTH
            )));
        }
        if self.noise_bound > (i64::MAX as u64) >> 1 {
            return Err(Error::InvalidParameters(format!(
                "noise_bound={} exceeds i64::MAX/2",
                self.noise_bound
            )));
        }
        Ok(())
    }
}
