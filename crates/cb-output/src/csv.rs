//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `bus_snapshots.csv`
//! - `stop_snapshots.csv`
//! - `arrival_events.csv`
//!
//! A stop's `line_ids` are joined with `;`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use cb_sim::{ArrivalEvent, BusSnapshot, StopSnapshot};

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    buses:    Writer<File>,
    stops:    Writer<File>,
    arrivals: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut buses = Writer::from_path(dir.join("bus_snapshots.csv"))?;
        buses.write_record([
            "bus_id", "line_id", "timestamp", "lat", "lon", "passengers", "capacity",
            "next_stop_id", "distance_to_next_m", "speed_kmh", "direction",
        ])?;

        let mut stops = Writer::from_path(dir.join("stop_snapshots.csv"))?;
        stops.write_record(["stop_id", "timestamp", "waiting", "line_ids"])?;

        let mut arrivals = Writer::from_path(dir.join("arrival_events.csv"))?;
        arrivals.write_record([
            "bus_id", "line_id", "stop_id", "timestamp", "boarded", "alighted",
            "bus_passengers", "stop_waiting", "terminal",
        ])?;

        Ok(Self { buses, stops, arrivals, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_bus_snapshots(&mut self, rows: &[BusSnapshot]) -> OutputResult<()> {
        for row in rows {
            self.buses.write_record(&[
                row.bus_id.clone(),
                row.line_id.clone(),
                row.timestamp.to_string(),
                format!("{:.6}", row.lat),
                format!("{:.6}", row.lon),
                row.passengers.to_string(),
                row.capacity.to_string(),
                row.next_stop_id.clone(),
                format!("{:.1}", row.distance_to_next_m),
                format!("{:.1}", row.speed_kmh),
                row.direction.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_stop_snapshots(&mut self, rows: &[StopSnapshot]) -> OutputResult<()> {
        for row in rows {
            self.stops.write_record(&[
                row.stop_id.clone(),
                row.timestamp.to_string(),
                row.waiting.to_string(),
                row.line_ids.join(";"),
            ])?;
        }
        Ok(())
    }

    fn write_arrival(&mut self, event: &ArrivalEvent) -> OutputResult<()> {
        self.arrivals.write_record(&[
            event.bus_id.clone(),
            event.line_id.clone(),
            event.stop_id.clone(),
            event.timestamp.to_string(),
            event.boarded.to_string(),
            event.alighted.to_string(),
            event.bus_passengers.to_string(),
            event.stop_waiting.to_string(),
            (event.terminal as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.buses.flush()?;
        self.stops.flush()?;
        self.arrivals.flush()?;
        Ok(())
    }
}
