use std::{cmp::Ordering, fmt};

use blindfx_backend::{FixedCodec, PowerOfTwoModulus, div_round_half_even, round_half_even, round_to_decimals};
use blindfx_sampling::source::Source;
use rug::{Integer, Rational};

use crate::{Ciphertext, EngineParameters, Error, KeyMaterial, Result};

/// Decimal places kept by [Engine::decrypt].
pub const DECRYPT_DECIMALS: u32 = 5;

/// Owns the key material of one blinding domain and evaluates every
/// operator over ciphertexts produced under it.
///
/// The engine is immutable after construction; randomness is supplied per
/// call, so a shared `&Engine` can be used from several threads.
pub struct Engine {
    params: EngineParameters,
    codec: FixedCodec,
    keys: KeyMaterial,
    scale: Integer,
    max_base: Integer,
}

impl Engine {
    /// Validates `params` and draws fresh key material from `source`.
    pub fn new(params: EngineParameters, source: &mut Source) -> Result<Self> {
        params.validate()?;

        let codec: FixedCodec = FixedCodec::new(params.byte_width);
        let keys: KeyMaterial = KeyMaterial::generate(params.a_bits, params.b_bits, codec.modulus().value(), source)?;

        // |base * A| < M/2 so that the B-unblinded residue lifts back to base * A exactly.
        let max_base: Integer = Integer::from(codec.modulus().half() - 1u32) / keys.a();
        let scale: Integer = Integer::from(params.scale);

        if max_base < scale {
            tracing::warn!(
                log_m = params.log_modulus(),
                a_bits = params.a_bits,
                scale = params.scale,
                "modulus leaves no headroom to encrypt 1.0"
            );
        }

        tracing::info!(
            scale = params.scale,
            noise_bound = params.noise_bound,
            byte_width = params.byte_width,
            a_bits = params.a_bits,
            b_bits = params.b_bits,
            "engine initialized"
        );

        Ok(Self {
            params,
            codec,
            keys,
            scale,
            max_base,
        })
    }

    pub fn with_defaults(source: &mut Source) -> Result<Self> {
        Self::new(EngineParameters::default(), source)
    }

    pub fn parameters(&self) -> &EngineParameters {
        &self.params
    }

    pub fn modulus(&self) -> &PowerOfTwoModulus {
        self.codec.modulus()
    }

    /// Largest `|base|` a ciphertext can carry without wrapping.
    pub fn max_base(&self) -> &Integer {
        &self.max_base
    }

    /// Encrypts `m` as `(base * A * B) mod M`.
    ///
    /// # Arguments
    ///
    /// * `m`: plaintext, scaled to `round(m * scale)` with ties to even.
    /// * `source`: draws the noise added to the scaled plaintext.
    ///
    /// Fails with [Error::Range] if `m` is not finite or the noisy scaled
    /// value exceeds [Engine::max_base].
    pub fn encrypt(&self, m: f64, source: &mut Source) -> Result<Ciphertext> {
        let m: Rational = Rational::from_f64(m).ok_or_else(|| Error::Range(format!("plaintext {} is not finite", m)))?;
        let scaled: Integer = round_half_even(&Rational::from(&m * &Rational::from(&self.scale)));
        let noise: i64 = source.next_i64_bounded(self.params.noise_bound);
        self.blind(&(scaled + noise))
    }

    /// Decrypts `c` to its plaintext rounded to [DECRYPT_DECIMALS] decimals.
    pub fn decrypt(&self, c: &Ciphertext) -> Result<f64> {
        let base: Integer = self.recover_base(c)?;
        Ok(round_to_decimals(
            &Rational::from((base, self.scale.clone())),
            DECRYPT_DECIMALS,
        ))
    }

    /// Recovers the scaled plaintext `base` carried by `c`.
    ///
    /// `B` is removed by modular inversion; `A` by a rounded division of the
    /// centered residue, which is exact while `|base * A| < M/2`.
    pub fn recover_base(&self, c: &Ciphertext) -> Result<Integer> {
        let val_with_a: Integer = self.unblind_b(c)?;
        Ok(div_round_half_even(&val_with_a, self.keys.a()))
    }

    /// Returns true if `c` has the canonical form `(base * A * B) mod M`
    /// with `|base| <= max_base`.
    pub fn is_canonical(&self, c: &Ciphertext) -> Result<bool> {
        let val_with_a: Integer = self.unblind_b(c)?;
        if !val_with_a.is_divisible(self.keys.a()) {
            return Ok(false);
        }
        let base: Integer = val_with_a / self.keys.a();
        Ok(base.cmp_abs(&self.max_base) != Ordering::Greater)
    }

    /// Parses the hexadecimal wire form of a ciphertext.
    pub fn parse_ciphertext(&self, s: &str) -> Result<Ciphertext> {
        Ok(Ciphertext::from_token(self.codec.from_hex(s)?))
    }

    pub(crate) fn scale(&self) -> &Integer {
        &self.scale
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    pub(crate) fn decode(&self, c: &Ciphertext) -> Result<Integer> {
        Ok(self.codec.decode(&c.token)?)
    }

    pub(crate) fn encode(&self, value: &Integer) -> Result<Ciphertext> {
        Ok(Ciphertext::from_token(self.codec.encode(value)?))
    }

    /// Maps a scaled plaintext to its canonical ciphertext.
    pub(crate) fn blind(&self, base: &Integer) -> Result<Ciphertext> {
        if base.cmp_abs(&self.max_base) == Ordering::Greater {
            return Err(Error::Range(format!(
                "scaled value with {} bits exceeds the {} bits of headroom",
                base.significant_bits(),
                self.max_base.significant_bits()
            )));
        }
        let obf: Integer = self.modulus().mul(base, self.keys.blinding());
        self.encode(&obf)
    }

    /// Returns `(c * B^-1) mod M` as a centered residue.
    fn unblind_b(&self, c: &Ciphertext) -> Result<Integer> {
        let obf: Integer = self.decode(c)?;
        let modulus: &PowerOfTwoModulus = self.modulus();
        Ok(modulus.lift(&modulus.mul(&obf, self.keys.b_inv())))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("params", &self.params)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
