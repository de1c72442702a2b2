//! Approximate homomorphic arithmetic over blinded fixed-point ciphertexts.
//!
//! A plaintext `m` is scaled to `base = round(m * scale) + noise` and stored
//! as `(base * A * B) mod M`, where `A` and `B` are secret odd multipliers and
//! `M = 2^(8 * byte_width)`. Every operator maps ciphertexts of that form to a
//! ciphertext of the same form, so they compose freely:
//!
//! - ring algebra: [Engine::add], [Engine::subtract], [Engine::scalar_multiply], [Engine::multiply]
//! - Newton-Raphson reciprocal and division: [Engine::inverse], [Engine::divide]
//! - statistics: [Engine::encrypted_sum], [Engine::encrypted_average], [Engine::encrypted_variance]
//!
//! This is an obfuscation scheme with bounded numerical error, not a
//! semantically secure encryption scheme.

pub mod ciphertext;
pub mod engine;
pub mod error;
pub mod keys;
pub mod ops;
pub mod parameters;
pub mod reciprocal;
pub mod statistics;
#[cfg(test)]
mod tests;

pub use ciphertext::*;
pub use engine::*;
pub use error::*;
pub use keys::*;
pub use parameters::*;
pub use reciprocal::*;

pub use blindfx_sampling::source::Source;
