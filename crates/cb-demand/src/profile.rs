//! Time-of-day demand multipliers.

use crate::{DemandError, DemandResult};

/// One band of the daily profile.
///
/// A band covers the half-open interval `(start_hour, end_hour]`, so an exact
/// band edge belongs to the band that *ends* there (the earlier-starting
/// one): 09:00 is still morning rush.  A band with `start_hour >= end_hour`
/// wraps past midnight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DemandBand {
    pub start_hour: f64,
    pub end_hour:   f64,
    pub multiplier: f64,
}

impl DemandBand {
    pub const fn new(start_hour: f64, end_hour: f64, multiplier: f64) -> Self {
        Self { start_hour, end_hour, multiplier }
    }

    /// Does this band cover `hour` (already normalised into `[0, 24)`)?
    pub fn contains(&self, hour: f64) -> bool {
        if self.start_hour < self.end_hour {
            hour > self.start_hour && hour <= self.end_hour
        } else {
            hour > self.start_hour || hour <= self.end_hour
        }
    }
}

/// Piecewise-constant, hour-keyed multiplier applied to every stop's base
/// arrival rate.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeOfDayProfile {
    bands:    Vec<DemandBand>,
    /// Used for hours no band covers.
    fallback: f64,
}

/// Weekday profile used by the feeders.
const DEFAULT_BANDS: [DemandBand; 6] = [
    DemandBand::new(6.0, 9.0, 1.5),   // morning rush
    DemandBand::new(9.0, 12.0, 0.6),  // mid-morning
    DemandBand::new(12.0, 15.0, 1.2), // lunch
    DemandBand::new(15.0, 18.0, 0.8), // afternoon
    DemandBand::new(18.0, 21.0, 1.4), // evening rush
    DemandBand::new(21.0, 6.0, 0.2),  // night
];

impl Default for TimeOfDayProfile {
    fn default() -> Self {
        Self { bands: DEFAULT_BANDS.to_vec(), fallback: 1.0 }
    }
}

impl TimeOfDayProfile {
    /// Build a custom profile.  Bands are matched in the given order; hours
    /// covered by none use a multiplier of 1.0.
    pub fn new(bands: Vec<DemandBand>) -> DemandResult<Self> {
        for b in &bands {
            let hours_ok = [b.start_hour, b.end_hour]
                .iter()
                .all(|h| h.is_finite() && (0.0..=24.0).contains(h));
            if !hours_ok {
                return Err(DemandError::InvalidBand(format!(
                    "hours ({}, {}] must lie within [0, 24]",
                    b.start_hour, b.end_hour
                )));
            }
            if !b.multiplier.is_finite() || b.multiplier < 0.0 {
                return Err(DemandError::InvalidBand(format!(
                    "multiplier {} must be finite and >= 0",
                    b.multiplier
                )));
            }
        }
        Ok(Self { bands, fallback: 1.0 })
    }

    /// The same multiplier all day.
    pub fn flat(multiplier: f64) -> Self {
        Self { bands: Vec::new(), fallback: multiplier.max(0.0) }
    }

    pub fn bands(&self) -> &[DemandBand] {
        &self.bands
    }

    /// Multiplier for a fractional local hour.  Values outside `[0, 24)` are
    /// wrapped.
    pub fn multiplier(&self, hour: f64) -> f64 {
        let hour = hour.rem_euclid(24.0);
        self.bands
            .iter()
            .find(|b| b.contains(hour))
            .map_or(self.fallback, |b| b.multiplier)
    }
}
