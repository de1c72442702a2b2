mod canonical;
mod reciprocal;

use crate::{Engine, EngineParameters};
use blindfx_sampling::source::Source;

/// Worst-case plaintext error of a fresh encryption: noise, scaling round-off
/// and the five decimal rounding of decrypt.
pub(crate) fn fresh_error(params: &EngineParameters) -> f64 {
    (params.noise_bound as f64 + 0.5) / params.scale as f64 + DECRYPT_SLACK
}

pub(crate) const DECRYPT_SLACK: f64 = 0.5e-5 + 1e-12;

pub(crate) fn new_engine(params: EngineParameters, seed: u8) -> (Engine, Source) {
    let mut source: Source = Source::new([seed; 32]);
    let engine: Engine = Engine::new(params, &mut source).unwrap();
    (engine, source)
}
