//! Simulation observer trait for progress reporting and data collection.

use cb_core::Tick;

use crate::{ArrivalEvent, SimStats, TickSnapshot};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers cannot fail the run: an
/// observer that writes somewhere is responsible for its own errors.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, visits: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {visits} stop visits");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per stop visit, in the order visits happen.
    fn on_arrival(&mut self, _event: &ArrivalEvent) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks), after the tick's state changes are complete.
    fn on_snapshot(&mut self, _snapshot: &TickSnapshot) {}

    /// Called at the end of each tick.  `visits` is the number of stop visits
    /// (arrival events) this tick.
    fn on_tick_end(&mut self, _tick: Tick, _visits: usize) {}

    /// Called once when the run stops, whether it completed or was asked to
    /// shut down.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &SimStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
