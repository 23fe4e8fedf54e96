//! Movement engine: advance a bus along its route for one tick.

use cb_core::{Direction, StopId};
use cb_network::TransitNetwork;

use crate::BusState;

/// A stop reached during [`MovementEngine::advance`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrivalPoint {
    pub stop:       StopId,
    /// Directional ordinal of the stop on the traversal just driven.
    pub ordinal:    usize,
    /// Direction the bus was travelling when it arrived.
    pub direction:  Direction,
    /// Everyone alights: the stop is flagged terminal, or it ends the
    /// traversal.
    pub terminal:   bool,
    /// The stop ends the traversal; the bus turns around here.
    pub turnaround: bool,
}

/// Summary of one bus's tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvanceOutcome {
    /// Along-route metres driven.
    pub distance_m:    f64,
    /// Stops reached, in order.
    pub arrivals:      Vec<StopId>,
    pub turned_around: bool,
}

/// Stateless movement rules.
///
/// # Algorithm
///
/// The tick's travel budget is `speed_kmh / 3.6 × dt_secs` metres.  While the
/// budget covers the gap to the next stop, the bus is placed exactly on that
/// stop and `on_arrival` runs before the remainder is spent, so several stops
/// in one tick are each visited in route order with no dwell.  Reaching the
/// final stop of a traversal flips the direction, resets the position to
/// `0.0` and ends the tick.  Every loop iteration either ends the tick or
/// moves to a later stop, so the loop always terminates.
pub struct MovementEngine;

impl MovementEngine {
    /// Move `bus` for `dt_secs` seconds at its current `speed_kmh`.
    ///
    /// `on_arrival` sees the bus positioned on the stop (before any
    /// turnaround) and may change its occupancy.  An error from the callback
    /// aborts the tick and is returned unchanged.
    pub fn advance<E, F>(
        bus:            &mut BusState,
        network:        &TransitNetwork,
        dt_secs:        f64,
        mut on_arrival: F,
    ) -> Result<AdvanceOutcome, E>
    where
        F: FnMut(&mut BusState, &ArrivalPoint) -> Result<(), E>,
    {
        let line = network.line(bus.line);
        let geometry = &line.geometry;
        let length_m = geometry.length_m();
        let last = line.stops.len() - 1;

        let mut outcome = AdvanceOutcome::default();
        let mut budget_m = (bus.speed_kmh / 3.6 * dt_secs).max(0.0);
        if !budget_m.is_finite() || length_m <= 0.0 {
            return Ok(outcome);
        }

        loop {
            let k = bus.next_ordinal.min(last);
            let target = geometry.boundary(bus.direction, k);
            let gap_m = (target - bus.position).max(0.0) * length_m;

            // Short of the next stop (and not rounding onto it): stop here.
            let reach = bus.position + budget_m / length_m;
            if budget_m < gap_m && reach < target {
                bus.position = reach;
                outcome.distance_m += budget_m;
                break;
            }

            budget_m = (budget_m - gap_m).max(0.0);
            outcome.distance_m += gap_m;
            bus.position = target;

            let stop = line.stop_at(bus.direction, k);
            let turnaround = k == last;
            let point = ArrivalPoint {
                stop,
                ordinal: k,
                direction: bus.direction,
                terminal: turnaround || network.stop(stop).terminal,
                turnaround,
            };
            on_arrival(bus, &point)?;
            outcome.arrivals.push(stop);

            if turnaround {
                bus.direction = bus.direction.flipped();
                bus.position = 0.0;
                bus.next_ordinal = 1;
                bus.trips_completed += 1;
                outcome.turned_around = true;
                log::debug!("bus on line {} turned at {stop}, now {}", line.code, bus.direction);
                break;
            }
            bus.next_ordinal = k + 1;
        }

        Ok(outcome)
    }
}
