use blindfx_sampling::source::Source;
use itertools::Itertools;
use rug::{Integer, Rational};

use crate::{Ciphertext, Engine, Error, Result};

impl Engine {
    /// Folds [Engine::add] over `cts`, starting from `encrypt(0.0)`.
    ///
    /// An empty sequence yields a fresh encryption of zero.
    pub fn encrypted_sum(&self, cts: &[Ciphertext], source: &mut Source) -> Result<Ciphertext> {
        cts.iter()
            .try_fold(self.encrypt(0.0, source)?, |acc, c| self.add(&acc, c))
    }

    /// Same value as [Engine::encrypted_sum], reduced as a balanced tree.
    ///
    /// Ring addition is associative and commutative, so the reduction order
    /// does not change the result.
    pub fn encrypted_sum_tree(&self, cts: &[Ciphertext], source: &mut Source) -> Result<Ciphertext> {
        let zero: Ciphertext = self.encrypt(0.0, source)?;
        match cts
            .iter()
            .map(|c| Ok(c.clone()))
            .tree_reduce(|a: Result<Ciphertext>, b: Result<Ciphertext>| self.add(&a?, &b?))
        {
            Some(sum) => self.add(&zero, &sum?),
            None => Ok(zero),
        }
    }

    /// Encrypted arithmetic mean, the sum rescaled by exactly `1/n`.
    pub fn encrypted_average(&self, cts: &[Ciphertext], source: &mut Source) -> Result<Ciphertext> {
        let n_inv: Rational = inverse_len(cts)?;
        let sum: Ciphertext = self.encrypted_sum(cts, source)?;
        self.rescale(&sum, &n_inv)
    }

    /// Encrypted population variance `E[X^2] - E[X]^2` (no Bessel correction).
    pub fn encrypted_variance(&self, cts: &[Ciphertext], source: &mut Source) -> Result<Ciphertext> {
        let n_inv: Rational = inverse_len(cts)?;

        let sum_sq: Ciphertext = cts
            .iter()
            .try_fold(self.encrypt(0.0, source)?, |acc, c| {
                self.add(&acc, &self.multiply(c, c)?)
            })?;
        let avg_sq: Ciphertext = self.rescale(&sum_sq, &n_inv)?;

        let avg: Ciphertext = self.encrypted_average(cts, source)?;
        let sq_of_avg: Ciphertext = self.multiply(&avg, &avg)?;

        self.subtract(&avg_sq, &sq_of_avg)
    }
}

fn inverse_len(cts: &[Ciphertext]) -> Result<Rational> {
    if cts.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(Rational::from((Integer::from(1), Integer::from(cts.len()))))
}
