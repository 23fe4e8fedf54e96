//! JSON-lines output backend: one JSON object per line, one file per stream.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use cb_sim::{ArrivalEvent, BusSnapshot, StopSnapshot};

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes `bus_snapshots.jsonl`, `stop_snapshots.jsonl`, and
/// `arrival_events.jsonl` in the output directory.
pub struct JsonLinesWriter {
    buses:    BufWriter<File>,
    stops:    BufWriter<File>,
    arrivals: BufWriter<File>,
    finished: bool,
}

impl JsonLinesWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let open = |name: &str| -> OutputResult<BufWriter<File>> {
            Ok(BufWriter::new(File::create(dir.join(name))?))
        };
        Ok(Self {
            buses:    open("bus_snapshots.jsonl")?,
            stops:    open("stop_snapshots.jsonl")?,
            arrivals: open("arrival_events.jsonl")?,
            finished: false,
        })
    }
}

fn write_line<T: Serialize>(out: &mut BufWriter<File>, value: &T) -> OutputResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

impl OutputWriter for JsonLinesWriter {
    fn write_bus_snapshots(&mut self, rows: &[BusSnapshot]) -> OutputResult<()> {
        rows.iter().try_for_each(|row| write_line(&mut self.buses, row))
    }

    fn write_stop_snapshots(&mut self, rows: &[StopSnapshot]) -> OutputResult<()> {
        rows.iter().try_for_each(|row| write_line(&mut self.stops, row))
    }

    fn write_arrival(&mut self, event: &ArrivalEvent) -> OutputResult<()> {
        write_line(&mut self.arrivals, event)
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
