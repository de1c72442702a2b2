use blindfx_sampling::source::Source;

use crate::{Ciphertext, Engine, EngineParameters, Result};

/// Newton-Raphson iterations used when the caller has no preference.
pub const DEFAULT_ITERATIONS: usize = 5;

/// Decrypted iterates `y_0, ..., y_N` of a reciprocal evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct ReciprocalTrace {
    iterates: Vec<f64>,
}

impl ReciprocalTrace {
    pub fn iterates(&self) -> &[f64] {
        &self.iterates
    }

    /// The decrypted final iterate `y_N`.
    pub fn last(&self) -> f64 {
        self.iterates.last().copied().unwrap_or(f64::NAN)
    }

    /// `|y_N - y_{N-1}|`, or `None` when no iteration ran.
    pub fn last_step(&self) -> Option<f64> {
        match self.iterates.as_slice() {
            [.., prev, last] => Some((last - prev).abs()),
            _ => None,
        }
    }

    /// True if the final Newton step moved the estimate by at most `tolerance`.
    pub fn is_settled(&self, tolerance: f64) -> bool {
        self.last_step().is_some_and(|step| step <= tolerance)
    }

    /// True if every iterate lies in \[lo, hi\].
    pub fn within(&self, lo: f64, hi: f64) -> bool {
        self.iterates.iter().all(|y| (lo..=hi).contains(y))
    }
}

impl Engine {
    /// Approximates an encryption of `1/m`, `m` the plaintext of `c`, with
    /// `iterations` Newton-Raphson steps `y <- y * (2 - c * y)` from
    /// `y_0 = encrypt(1.0)`.
    ///
    /// Converges for `m` in (0, 2) and quickly on \[1, 2); outside that range
    /// the iterates diverge without any error being reported, until they
    /// leave the headroom and a multiplication fails with [crate::Error::Range].
    /// Use [Engine::inverse_traced] to inspect the iterates.
    pub fn inverse(&self, c: &Ciphertext, iterations: usize, source: &mut Source) -> Result<Ciphertext> {
        self.newton_raphson(c, iterations, source, |_, _| Ok(()))
    }

    /// Same as [Engine::inverse], also returning the decrypted iterates.
    ///
    /// This decrypts intermediate values, so only the key holder can use it.
    pub fn inverse_traced(
        &self,
        c: &Ciphertext,
        iterations: usize,
        source: &mut Source,
    ) -> Result<(Ciphertext, ReciprocalTrace)> {
        let mut iterates: Vec<f64> = Vec::with_capacity(iterations + 1);
        let y: Ciphertext = self.newton_raphson(c, iterations, source, |i, y| {
            let value: f64 = self.decrypt(y)?;
            tracing::debug!(iteration = i, value, "reciprocal iterate");
            iterates.push(value);
            Ok(())
        })?;

        let trace: ReciprocalTrace = ReciprocalTrace { iterates };
        if let Some(step) = trace.last_step() {
            if step > self.settle_tolerance() {
                tracing::warn!(iterations, step, "reciprocal iterates have not settled");
            }
        }
        Ok((y, trace))
    }

    /// Homomorphic division: `multiply(c1, inverse(c2, iterations))`.
    pub fn divide(
        &self,
        c1: &Ciphertext,
        c2: &Ciphertext,
        iterations: usize,
        source: &mut Source,
    ) -> Result<Ciphertext> {
        let c2_inv: Ciphertext = self.inverse(c2, iterations, source)?;
        self.multiply(c1, &c2_inv)
    }

    fn newton_raphson<F>(&self, c: &Ciphertext, iterations: usize, source: &mut Source, mut observe: F) -> Result<Ciphertext>
    where
        F: FnMut(usize, &Ciphertext) -> Result<()>,
    {
        let mut y: Ciphertext = self.encrypt(1.0, source)?;
        let two: Ciphertext = self.encrypt(2.0, source)?;
        observe(0, &y)?;
        for i in 1..=iterations {
            let cy: Ciphertext = self.multiply(c, &y)?;
            let diff: Ciphertext = self.subtract(&two, &cy)?;
            y = self.multiply(&y, &diff)?;
            observe(i, &y)?;
        }
        Ok(y)
    }

    // Ten times the encryption noise floor, in plaintext units.
    fn settle_tolerance(&self) -> f64 {
        let params: &EngineParameters = self.parameters();
        10.0 * (params.noise_bound as f64 + 1.0) / params.scale as f64
    }
}
