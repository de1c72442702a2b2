use blindfx_backend::{div_round_half_even, round_half_even};
use rug::{Integer, Rational};

use crate::{Ciphertext, Engine, Error, Result};

impl Engine {
    /// Homomorphic addition: `(c1 + c2) mod M`.
    ///
    /// Both operands carry the same `A * B` factor, so the sum carries it
    /// too. Pure ring arithmetic; an overflow of the headroom wraps silently.
    pub fn add(&self, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext> {
        let x: Integer = self.decode(c1)?;
        let y: Integer = self.decode(c2)?;
        self.encode(&self.modulus().add(&x, &y))
    }

    /// Homomorphic subtraction: `(c1 - c2) mod M`.
    pub fn subtract(&self, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext> {
        let x: Integer = self.decode(c1)?;
        let y: Integer = self.decode(c2)?;
        self.encode(&self.modulus().sub(&x, &y))
    }

    /// Multiplies the plaintext of `c` by the real constant `k`.
    ///
    /// The carried base becomes `round(base * k)`, ties to even, and is
    /// re-blinded into canonical form.
    pub fn scalar_multiply(&self, c: &Ciphertext, k: f64) -> Result<Ciphertext> {
        let k: Rational = Rational::from_f64(k).ok_or_else(|| Error::Range(format!("scalar {} is not finite", k)))?;
        self.rescale(c, &k)
    }

    /// Homomorphic multiplication.
    ///
    /// The raw product of two canonical ciphertexts carries one `A * B`
    /// factor and one `scale` factor too many. Both are removed with a single
    /// half-even rounding, `round(base1 * base2 / scale)`, and the result is
    /// re-blinded with one `A * B`.
    pub fn multiply(&self, c1: &Ciphertext, c2: &Ciphertext) -> Result<Ciphertext> {
        let base1: Integer = self.recover_base(c1)?;
        let base2: Integer = self.recover_base(c2)?;
        let corrected: Integer = div_round_half_even(&Integer::from(&base1 * &base2), self.scale());
        self.blind(&corrected)
    }

    /// Rescales the plaintext of `c` by an exact rational.
    pub(crate) fn rescale(&self, c: &Ciphertext, k: &Rational) -> Result<Ciphertext> {
        let base: Integer = self.recover_base(c)?;
        let scaled: Integer = round_half_even(&Rational::from(k * &Rational::from(base)));
        self.blind(&scaled)
    }
}
