//! Per-bus dynamic state.

use cb_core::{Direction, LineId};
use cb_network::{BusSpec, RouteGeometry};

/// The dynamic state of one bus.
///
/// `position` is normalised over the current directional traversal (see
/// [`cb_network::geometry`]).  `next_ordinal` is the directional index of
/// the next stop to be served; it is tracked explicitly rather than derived
/// from `position` so that consecutive stops sharing a boundary are each
/// served.
#[derive(Debug, Clone, PartialEq)]
pub struct BusState {
    pub line:            LineId,
    pub capacity:        u32,
    pub passengers:      u32,
    pub position:        f64,
    pub direction:       Direction,
    /// Directional ordinal of the next stop ahead.
    pub next_ordinal:    usize,
    /// Speed used during the last tick, km/h.
    pub speed_kmh:       f64,
    /// Completed traversals (terminal turnarounds) since the run started.
    pub trips_completed: u32,
}

impl BusState {
    /// Initial state from configuration: empty, stationary.
    ///
    /// A bus configured exactly on a stop has already served it; the next
    /// stop is the one after.
    pub fn from_spec(spec: &BusSpec, geometry: &RouteGeometry) -> Self {
        Self {
            line:            spec.line,
            capacity:        spec.capacity,
            passengers:      0,
            position:        spec.initial_position,
            direction:       spec.initial_direction,
            next_ordinal:    geometry.next_ordinal(spec.initial_direction, spec.initial_position),
            speed_kmh:       0.0,
            trips_completed: 0,
        }
    }

    /// Seats and standing room left.
    #[inline]
    pub fn free_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.passengers)
    }
}
