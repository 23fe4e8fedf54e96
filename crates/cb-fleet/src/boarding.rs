//! Passenger exchange when a bus reaches a stop.
//!
//! # Order of operations
//!
//! 1. Alight.  At a terminal everyone leaves; elsewhere a fraction drawn from
//!    the bus's [`AlightingPolicy`] leaves, rounded to the nearest passenger.
//! 2. Board.  `min(waiting, capacity − remaining)` passengers get on.
//!
//! [`resolve_transfer`] is the pure arithmetic; [`board_and_alight`] applies
//! it to a bus and a stop, checking every invariant on the way.

use cb_core::{BusId, EntityRng, StopId};
use cb_demand::StopStore;

use crate::{ArrivalPoint, BusState, FleetError, FleetResult};

// ── Policy ────────────────────────────────────────────────────────────────────

/// Range of the fraction of on-board passengers alighting at a regular stop.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AlightingPolicy {
    min_fraction: f64,
    max_fraction: f64,
}

impl Default for AlightingPolicy {
    fn default() -> Self {
        Self { min_fraction: 0.2, max_fraction: 0.4 }
    }
}

impl AlightingPolicy {
    pub fn new(min_fraction: f64, max_fraction: f64) -> FleetResult<Self> {
        if !(0.0..=1.0).contains(&min_fraction)
            || !(0.0..=1.0).contains(&max_fraction)
            || min_fraction > max_fraction
        {
            return Err(FleetError::InvalidParameter(format!(
                "alighting fraction range [{min_fraction}, {max_fraction}] must lie within [0, 1]"
            )));
        }
        Ok(Self { min_fraction, max_fraction })
    }

    /// Always the same fraction.
    pub fn fixed(fraction: f64) -> FleetResult<Self> {
        Self::new(fraction, fraction)
    }

    pub fn sample_fraction(&self, rng: &mut EntityRng) -> f64 {
        if self.min_fraction == self.max_fraction {
            return self.min_fraction;
        }
        rng.gen_range(self.min_fraction..=self.max_fraction)
    }
}

// ── Transfer arithmetic ───────────────────────────────────────────────────────

/// Passengers moved in one stop visit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Transfer {
    pub alighted: u32,
    pub boarded:  u32,
}

/// Compute alighting then boarding for one visit.
///
/// `fraction` is ignored when `terminal` is set.
pub fn resolve_transfer(
    passengers: u32,
    capacity:   u32,
    waiting:    u32,
    terminal:   bool,
    fraction:   f64,
) -> Transfer {
    let alighted = if terminal {
        passengers
    } else {
        (passengers as f64 * fraction.clamp(0.0, 1.0)).round() as u32
    };
    let remaining = passengers.saturating_sub(alighted);
    let boarded = waiting.min(capacity.saturating_sub(remaining));
    Transfer { alighted, boarded }
}

// ── Applying a visit ──────────────────────────────────────────────────────────

/// What happened at one stop visit, as reported to observers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StopVisit {
    pub stop:          StopId,
    pub alighted:      u32,
    pub boarded:       u32,
    /// On board after the exchange.
    pub passengers:    u32,
    /// Left waiting at the stop after the exchange.
    pub waiting_after: u32,
    pub terminal:      bool,
    pub turnaround:    bool,
}

/// Exchange passengers between `bus` and the stop at `point`.
///
/// Every step is checked.  A violation means the arithmetic above is wrong,
/// so it is reported as [`FleetError::InvariantViolation`] and nothing is
/// clamped into range.
pub fn board_and_alight(
    bus_id: BusId,
    bus:    &mut BusState,
    point:  &ArrivalPoint,
    stops:  &mut StopStore,
    policy: &AlightingPolicy,
    rng:    &mut EntityRng,
) -> FleetResult<StopVisit> {
    let waiting = stops.waiting(point.stop);
    let fraction = if point.terminal { 1.0 } else { policy.sample_fraction(rng) };
    let t = resolve_transfer(bus.passengers, bus.capacity, waiting, point.terminal, fraction);

    let remaining = bus.passengers.checked_sub(t.alighted).ok_or_else(|| {
        violation(bus_id, format!("{} alighting with only {} on board", t.alighted, bus.passengers))
    })?;
    let passengers = remaining
        .checked_add(t.boarded)
        .filter(|&p| p <= bus.capacity)
        .ok_or_else(|| {
            violation(bus_id, format!(
                "{} boarding onto {remaining} exceeds capacity {}",
                t.boarded, bus.capacity
            ))
        })?;
    if point.terminal && remaining != 0 {
        return Err(violation(bus_id, format!("{remaining} still on board at terminal {}", point.stop)));
    }

    let waiting_after = stops.board(point.stop, t.boarded)?;
    bus.passengers = passengers;

    log::trace!(
        "{bus_id} at {}: -{} +{} → {} on board, {} waiting",
        point.stop, t.alighted, t.boarded, passengers, waiting_after
    );

    Ok(StopVisit {
        stop: point.stop,
        alighted: t.alighted,
        boarded: t.boarded,
        passengers,
        waiting_after,
        terminal: point.terminal,
        turnaround: point.turnaround,
    })
}

fn violation(bus: BusId, detail: String) -> FleetError {
    FleetError::InvariantViolation { bus, detail }
}
