//! Stochastic monthly revenue and charge figures
//!
//! A monthly figure is the base value grown at a fixed monthly rate, scaled
//! by `1 + z * volatility` where `z` is a standard normal draw obtained with
//! the Box-Muller transform. The uniform draws come from a [`UniformSource`]
//! so tests can script them and batch runs can seed them.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::money::round_currency;

/// Smallest uniform draw fed to `ln`
const MIN_UNIFORM: f64 = 1e-12;

/// Source of uniform draws in (0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Uniform draws from a `StdRng`
#[derive(Debug, Clone)]
pub struct RandUniform {
    rng: StdRng,
}

impl RandUniform {
    /// Reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible source seeded from the OS
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl UniformSource for RandUniform {
    fn next_uniform(&mut self) -> f64 {
        // gen::<f64>() is in [0, 1); 0 is clamped by the caller
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct FixedUniform {
    values: Vec<f64>,
    position: usize,
}

impl FixedUniform {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Draws giving z ~ 0 for every pair (u2 = 0.25 puts the cosine at zero)
    pub fn neutral() -> Self {
        Self::new(vec![0.5, 0.25])
    }
}

impl UniformSource for FixedUniform {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

/// Standard normal variate from two uniform draws (Box-Muller, cosine branch)
pub fn standard_normal<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    let u1 = source.next_uniform().max(MIN_UNIFORM);
    let u2 = source.next_uniform();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Expected value before noise: `base * (1 + growth)^(month - 1)`
pub fn expected_value(base_value: f64, growth_rate: f64, month: u32) -> f64 {
    let periods = month.saturating_sub(1) as i32;
    base_value * (1.0 + growth_rate).powi(periods)
}

/// One month's figure for a revenue or charge line
///
/// `month` is 1-based. The result is floored at 0 and rounded to cents.
/// Two uniform draws are consumed on every call, even at zero volatility,
/// so the draw sequence does not depend on the volatility setting.
pub fn generate_value<S: UniformSource + ?Sized>(
    base_value: f64,
    volatility: f64,
    growth_rate: f64,
    month: u32,
    source: &mut S,
) -> f64 {
    let expected = expected_value(base_value, growth_rate, month);
    let z = standard_normal(source);
    let value = expected * (1.0 + z * volatility);
    round_currency(value).max(0.0)
}
