//! The `OutputWriter` trait implemented by all backend writers.

use cb_sim::{ArrivalEvent, BusSnapshot, StopSnapshot};

use crate::OutputResult;

/// Trait implemented by the CSV and JSON-lines writers.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// logs and counts them without stopping the simulation.
pub trait OutputWriter {
    /// Write a batch of bus snapshot rows.
    fn write_bus_snapshots(&mut self, rows: &[BusSnapshot]) -> OutputResult<()>;

    /// Write a batch of stop snapshot rows.
    fn write_stop_snapshots(&mut self, rows: &[StopSnapshot]) -> OutputResult<()>;

    /// Write one arrival event.
    fn write_arrival(&mut self, event: &ArrivalEvent) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_bus_snapshots(&mut self, rows: &[BusSnapshot]) -> OutputResult<()> {
        (**self).write_bus_snapshots(rows)
    }

    fn write_stop_snapshots(&mut self, rows: &[StopSnapshot]) -> OutputResult<()> {
        (**self).write_stop_snapshots(rows)
    }

    fn write_arrival(&mut self, event: &ArrivalEvent) -> OutputResult<()> {
        (**self).write_arrival(event)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
