//! Passenger arrival models.
//!
//! The arrival model turns an expected count into an actual count.  It is a
//! trait so the simulation can be run reproducibly with a deterministic
//! variant in tests and stochastically in production.

use rand_distr::{Distribution, Poisson};

use cb_core::EntityRng;

/// Expected new passengers at a stop over one tick.
///
/// `rate_per_min` is the stop's base rate, `multiplier` the time-of-day
/// factor.
#[inline]
pub fn expected_arrivals(rate_per_min: f64, multiplier: f64, tick_secs: u32) -> f64 {
    rate_per_min * multiplier * (tick_secs as f64 / 60.0)
}

/// Converts an expected arrival count into a sampled count.
///
/// # Contract
///
/// - Must be deterministic given the same `rng` state.
/// - Must return 0 for a non-positive or non-finite `expected`.
/// - Must not block or perform I/O.
pub trait ArrivalModel {
    fn sample(&self, expected: f64, rng: &mut EntityRng) -> u32;
}

impl<M: ArrivalModel + ?Sized> ArrivalModel for Box<M> {
    #[inline]
    fn sample(&self, expected: f64, rng: &mut EntityRng) -> u32 {
        (**self).sample(expected, rng)
    }
}

// ── Poisson ───────────────────────────────────────────────────────────────────

/// Arrivals follow a Poisson process: the count per tick is
/// `Poisson(expected)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct PoissonArrivals;

impl ArrivalModel for PoissonArrivals {
    fn sample(&self, expected: f64, rng: &mut EntityRng) -> u32 {
        if !(expected.is_finite() && expected > 0.0) {
            return 0;
        }
        match Poisson::new(expected) {
            // `as` saturates, which is the clamp into the u32 range.
            Ok(dist) => dist.sample(rng.inner()) as u32,
            Err(_) => 0,
        }
    }
}

// ── Deterministic ─────────────────────────────────────────────────────────────

/// The expected count rounded half away from zero.  The RNG is untouched.
///
/// Fractional expectations below 0.5 round to zero every tick, so quiet stops
/// at night never fill up under this model.
#[derive(Copy, Clone, Debug, Default)]
pub struct ExpectedArrivals;

impl ArrivalModel for ExpectedArrivals {
    fn sample(&self, expected: f64, _rng: &mut EntityRng) -> u32 {
        if !(expected.is_finite() && expected > 0.0) {
            return 0;
        }
        expected.round() as u32
    }
}
