//! Resolved, validated network entities.

use cb_core::{BusId, Direction, GeoPoint, LineId, StopId};

use crate::RouteGeometry;

/// A physical stop.  Shared by every line that lists its code.
#[derive(Clone, Debug)]
pub struct Stop {
    pub id:           StopId,
    pub code:         String,
    pub name:         String,
    pub pos:          GeoPoint,
    /// Flagged as a terminal in the configuration.
    pub terminal:     bool,
    /// Base passenger arrival rate, people per minute.
    pub arrival_rate: f64,
    /// Lines serving this stop, in configuration order.
    pub lines:        Vec<LineId>,
}

/// A bus line: an ordered stop sequence plus its geometry.
#[derive(Clone, Debug)]
pub struct Line {
    pub id:       LineId,
    pub code:     String,
    pub name:     String,
    /// Stops in outbound order.
    pub stops:    Vec<StopId>,
    pub geometry: RouteGeometry,
}

impl Line {
    /// The stop reached `k`-th on a traversal in `direction`.
    #[inline]
    pub fn stop_at(&self, direction: Direction, k: usize) -> StopId {
        self.stops[self.geometry.physical_index(direction, k)]
    }

    /// The stop where a traversal in `direction` ends and the bus turns.
    #[inline]
    pub fn end_stop(&self, direction: Direction) -> StopId {
        self.stop_at(direction, self.stops.len() - 1)
    }
}

/// Initial description of one bus.
#[derive(Clone, Debug)]
pub struct BusSpec {
    pub id:                BusId,
    pub code:              String,
    pub line:              LineId,
    pub capacity:          u32,
    pub initial_position:  f64,
    pub initial_direction: Direction,
}

/// The complete, immutable network: lines, stops, and fleet.
///
/// Vectors are indexed by the corresponding typed id.
#[derive(Clone, Debug)]
pub struct TransitNetwork {
    pub lines: Vec<Line>,
    pub stops: Vec<Stop>,
    pub buses: Vec<BusSpec>,
}

impl TransitNetwork {
    #[inline]
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    #[inline]
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    #[inline]
    pub fn bus(&self, id: BusId) -> &BusSpec {
        &self.buses[id.index()]
    }

    pub fn stop_by_code(&self, code: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.code == code)
    }

    pub fn bus_by_code(&self, code: &str) -> Option<&BusSpec> {
        self.buses.iter().find(|b| b.code == code)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }
}
