//! CSV network and fleet loader.
//!
//! # Network CSV
//!
//! One row per (line, stop) pair, in outbound route order.  A line's rows
//! form one contiguous block and every row of the block carries the same
//! `line_name`; a `line_id` that reappears after another line's block is a
//! duplicate definition.
//!
//! ```csv
//! line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate
//! L1,Harbour - Station,S1,Harbour,47.3660,8.5410,true,2.5
//! L1,Harbour - Station,S2,Market,47.3700,8.5400,false,1.8
//! L1,Harbour - Station,S3,Station,47.3780,8.5400,true,1.0
//! ```
//!
//! A `stop_id` listed by several lines is one physical stop; every row for
//! it must carry the same name, coordinate, terminal flag, and rate.
//!
//! **`terminal`** accepts `true`/`false`, `1`/`0`, `yes`/`no` (any case).
//!
//! # Fleet CSV
//!
//! ```csv
//! bus_id,line_id,capacity,initial_position,direction
//! B1,L1,80,0.0,0
//! B2,L1,80,0.5,1
//! ```
//!
//! `direction` is optional (`0` = outbound, `1` = inbound; default `0`).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cb_core::{Direction, GeoPoint, LineId};

use crate::{BusDef, NetworkBuilder, NetworkError, NetworkResult, StopDef, TransitNetwork};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NetworkRecord {
    line_id:      String,
    line_name:    String,
    stop_id:      String,
    stop_name:    String,
    lat:          f64,
    lon:          f64,
    terminal:     String,
    arrival_rate: f64,
}

#[derive(Deserialize)]
struct FleetRecord {
    bus_id:           String,
    line_id:          String,
    capacity:         i64,
    initial_position: f64,
    #[serde(default)]
    direction:        Option<u8>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a network from a network CSV and a fleet CSV.
pub fn load_network_csv(network: &Path, fleet: &Path) -> NetworkResult<TransitNetwork> {
    log::info!("loading network from {} and fleet from {}", network.display(), fleet.display());
    let network_file = std::fs::File::open(network)?;
    let fleet_file = std::fs::File::open(fleet)?;
    load_network_reader(network_file, fleet_file)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for tests (pass a `std::io::Cursor`) and for embedded sample data.
pub fn load_network_reader<N: Read, F: Read>(network: N, fleet: F) -> NetworkResult<TransitNetwork> {
    let mut builder = NetworkBuilder::new();

    // ── Lines and stops ───────────────────────────────────────────────────
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(network);

    // Line of the block being read: (id, code, name).
    let mut current: Option<(LineId, String, String)> = None;

    for (row, result) in rdr.deserialize::<NetworkRecord>().enumerate() {
        let rec = result.map_err(|e| NetworkError::Parse(format!("network row {}: {e}", row + 1)))?;

        let line = match &current {
            Some((id, code, name)) if *code == rec.line_id => {
                if *name != rec.line_name {
                    return Err(NetworkError::ConflictingLineName {
                        line:   rec.line_id,
                        first:  name.clone(),
                        second: rec.line_name,
                    });
                }
                *id
            }
            _ => {
                if builder.line_id(&rec.line_id).is_some() {
                    return Err(NetworkError::DuplicateLine(rec.line_id));
                }
                let id = builder.add_line(rec.line_id.clone(), rec.line_name.clone());
                current = Some((id, rec.line_id.clone(), rec.line_name.clone()));
                id
            }
        };

        builder.add_stop(line, StopDef {
            terminal:     parse_flag(&rec.terminal, &rec.stop_id)?,
            code:         rec.stop_id,
            name:         rec.stop_name,
            pos:          GeoPoint::new(rec.lat, rec.lon),
            arrival_rate: rec.arrival_rate,
        });
    }

    // ── Fleet ─────────────────────────────────────────────────────────────
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(fleet);

    for (row, result) in rdr.deserialize::<FleetRecord>().enumerate() {
        let rec = result.map_err(|e| NetworkError::Parse(format!("fleet row {}: {e}", row + 1)))?;

        let capacity = u32::try_from(rec.capacity)
            .ok()
            .filter(|&c| c > 0)
            .ok_or_else(|| NetworkError::InvalidCapacity {
                bus:      rec.bus_id.clone(),
                capacity: rec.capacity,
            })?;
        let direction = match rec.direction {
            None => Direction::Outbound,
            Some(d) => Direction::from_u8(d).ok_or_else(|| {
                NetworkError::Parse(format!("bus {:?}: direction must be 0 or 1, got {d}", rec.bus_id))
            })?,
        };

        builder.add_bus(BusDef {
            code: rec.bus_id,
            line: rec.line_id,
            capacity,
            initial_position: rec.initial_position,
            direction,
        });
    }

    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_flag(s: &str, stop: &str) -> NetworkResult<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" | "" => Ok(false),
        other => Err(NetworkError::Parse(format!(
            "stop {stop:?}: invalid terminal flag {other:?}: expected true/false"
        ))),
    }
}
