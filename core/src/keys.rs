use std::fmt;

use blindfx_backend::PowerOfTwoModulus;
use blindfx_sampling::source::Source;
use rug::{Integer, integer::Order};

use crate::{Error, Result};

/// The two secret multipliers `A`, `B` and `B^-1 mod M`.
///
/// Immutable once generated. Its `Debug` output only shows the bit lengths.
pub struct KeyMaterial {
    a: Integer,
    b: Integer,
    b_inv: Integer,
    ab: Integer,
    modulus: PowerOfTwoModulus,
    a_bits: u32,
    b_bits: u32,
}

impl KeyMaterial {
    /// Draws odd multipliers of `a_bits` and `b_bits` random bits and inverts
    /// `B` modulo `modulus`, which must be a power of two.
    pub fn generate(a_bits: u32, b_bits: u32, modulus: &Integer, source: &mut Source) -> Result<Self> {
        if b_bits == 0 {
            return Err(Error::KeyGeneration("b_bits must be > 0".into()));
        }
        if *modulus <= 1 || !modulus.is_power_of_two() {
            return Err(Error::KeyGeneration(format!(
                "modulus must be a power of two > 1, got {}",
                modulus
            )));
        }

        let modulus: PowerOfTwoModulus = PowerOfTwoModulus::new(modulus.significant_bits() - 1);

        let a: Integer = draw_odd(a_bits, source);
        let b: Integer = draw_odd(b_bits, source);

        let b_inv: Integer = modulus
            .invert(&b)
            .ok_or_else(|| Error::KeyGeneration("B is not invertible modulo M".into()))?;

        let ab: Integer = modulus.mul(&a, &b);

        tracing::debug!(a_bits, b_bits, log_m = modulus.log_m(), "generated blinding key material");

        Ok(Self {
            a,
            b,
            b_inv,
            ab,
            modulus,
            a_bits,
            b_bits,
        })
    }

    pub(crate) fn a(&self) -> &Integer {
        &self.a
    }

    #[cfg(test)]
    pub(crate) fn b(&self) -> &Integer {
        &self.b
    }

    pub(crate) fn b_inv(&self) -> &Integer {
        &self.b_inv
    }

    /// Returns `A * B mod M`.
    pub(crate) fn blinding(&self) -> &Integer {
        &self.ab
    }

    pub fn modulus(&self) -> &PowerOfTwoModulus {
        &self.modulus
    }

    pub fn a_bits(&self) -> u32 {
        self.a_bits
    }

    pub fn b_bits(&self) -> u32 {
        self.b_bits
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("a_bits", &self.a_bits)
            .field("b_bits", &self.b_bits)
            .field("log_m", &self.modulus.log_m())
            .finish_non_exhaustive()
    }
}

// Forcing the low bit makes the value a unit of Z_{2^k}.
fn draw_odd(bits: u32, source: &mut Source) -> Integer {
    let mut x: Integer = Integer::from_digits(&source.next_bits(bits), Order::Msf);
    x.set_bit(0, true);
    x
}
