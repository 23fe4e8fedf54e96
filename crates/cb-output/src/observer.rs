//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use cb_core::Tick;
use cb_sim::{ArrivalEvent, SimObserver, SimStats, TickSnapshot};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots and arrival events to any
/// [`OutputWriter`] backend.
///
/// A failed write is logged at `warn`, counted, and otherwise ignored: the
/// simulation keeps running and the next record is attempted as usual.
/// The first error is kept for inspection with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    failures:    u64,
    first_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, failures: 0, first_error: None }
    }

    /// Number of writes that failed so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Take the first stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, what: &str, result: OutputResult<()>) {
        if let Err(e) = result {
            self.failures += 1;
            log::warn!("output: failed to write {what} ({} failures so far): {e}", self.failures);
            if self.first_error.is_none() {
                self.first_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_arrival(&mut self, event: &ArrivalEvent) {
        let result = self.writer.write_arrival(event);
        self.store_err("arrival event", result);
    }

    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        if !snapshot.buses.is_empty() {
            let result = self.writer.write_bus_snapshots(&snapshot.buses);
            self.store_err("bus snapshots", result);
        }
        if !snapshot.stops.is_empty() {
            let result = self.writer.write_stop_snapshots(&snapshot.stops);
            self.store_err("stop snapshots", result);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &SimStats) {
        let result = self.writer.finish();
        self.store_err("final flush", result);
        log::info!(
            "output closed at {final_tick}: {} stop visits written, {} write failures",
            stats.stop_visits, self.failures
        );
    }
}
