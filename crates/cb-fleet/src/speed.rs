//! Bus speed models.

use cb_core::EntityRng;

use crate::{FleetError, FleetResult};

/// Chooses a bus's speed for the coming tick.
///
/// Called once per bus per tick, before movement, with that bus's own RNG.
pub trait SpeedModel {
    fn sample_kmh(&self, rng: &mut EntityRng) -> f64;
}

impl<M: SpeedModel + ?Sized> SpeedModel for Box<M> {
    #[inline]
    fn sample_kmh(&self, rng: &mut EntityRng) -> f64 {
        (**self).sample_kmh(rng)
    }
}

/// Every bus always drives at the same speed.
#[derive(Copy, Clone, Debug)]
pub struct ConstantSpeed(pub f64);

impl Default for ConstantSpeed {
    /// Typical urban bus average including traffic, 25 km/h.
    fn default() -> Self {
        ConstantSpeed(25.0)
    }
}

impl SpeedModel for ConstantSpeed {
    #[inline]
    fn sample_kmh(&self, _rng: &mut EntityRng) -> f64 {
        self.0
    }
}

/// Speed drawn uniformly from `[min_kmh, max_kmh]` every tick.
#[derive(Copy, Clone, Debug)]
pub struct UniformSpeed {
    min_kmh: f64,
    max_kmh: f64,
}

impl UniformSpeed {
    pub fn new(min_kmh: f64, max_kmh: f64) -> FleetResult<Self> {
        if !(min_kmh.is_finite() && max_kmh.is_finite()) || min_kmh < 0.0 || min_kmh > max_kmh {
            return Err(FleetError::InvalidParameter(format!(
                "speed range [{min_kmh}, {max_kmh}] km/h must satisfy 0 <= min <= max"
            )));
        }
        Ok(Self { min_kmh, max_kmh })
    }

    /// `base ± jitter`, floored at zero.
    pub fn around(base_kmh: f64, jitter_kmh: f64) -> FleetResult<Self> {
        Self::new((base_kmh - jitter_kmh).max(0.0), base_kmh + jitter_kmh)
    }
}

impl SpeedModel for UniformSpeed {
    fn sample_kmh(&self, rng: &mut EntityRng) -> f64 {
        if self.min_kmh == self.max_kmh {
            return self.min_kmh;
        }
        rng.gen_range(self.min_kmh..=self.max_kmh)
    }
}
