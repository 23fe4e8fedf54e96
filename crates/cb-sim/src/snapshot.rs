//! Output records: what observers and writers see.
//!
//! All ids are the human-readable codes from the configuration files, and
//! all timestamps are Unix seconds.

use serde::Serialize;

/// One bus at the end of a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BusSnapshot {
    pub bus_id:             String,
    pub line_id:            String,
    pub timestamp:          i64,
    pub lat:                f64,
    pub lon:                f64,
    pub passengers:         u32,
    pub capacity:           u32,
    pub next_stop_id:       String,
    pub distance_to_next_m: f64,
    pub speed_kmh:          f64,
    /// `0` outbound, `1` inbound.
    pub direction:          u8,
}

/// One stop at the end of a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StopSnapshot {
    pub stop_id:   String,
    pub timestamp: i64,
    pub waiting:   u32,
    pub line_ids:  Vec<String>,
}

/// One bus visiting one stop.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrivalEvent {
    pub bus_id:         String,
    pub line_id:        String,
    pub stop_id:        String,
    /// Start of the tick in which the visit happened.
    pub timestamp:      i64,
    pub boarded:        u32,
    pub alighted:       u32,
    /// On board after the exchange.
    pub bus_passengers: u32,
    /// Left waiting after the exchange.
    pub stop_waiting:   u32,
    pub terminal:       bool,
}

/// The whole network's state after `tick` completed ticks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickSnapshot {
    pub tick:      u64,
    pub timestamp: i64,
    pub buses:     Vec<BusSnapshot>,
    pub stops:     Vec<StopSnapshot>,
}
