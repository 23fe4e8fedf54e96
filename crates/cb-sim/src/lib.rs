//! `cb-sim`: tick loop orchestrator for the citybus simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Stops:   every stop receives this tick's new passengers
//!               (time-of-day multiplier at the tick's start hour).
//!   ② Buses:   in BusId order: sample speed, advance along the route,
//!               alight/board at every stop reached (ArrivalEvent per visit).
//!   ③ Check:   passenger conservation and occupancy bounds.
//!   ④ Emit:    TickSnapshot every `output_interval_ticks` ticks.
//! ```
//!
//! Stops are updated before buses, so a bus can pick up passengers who
//! arrived at its stop during the same tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cb_core::SimConfig;
//! use cb_network::load_network_csv;
//! use cb_sim::{NoopObserver, SimBuilder};
//!
//! let network = load_network_csv(network_path, fleet_path)?;
//! let mut sim = SimBuilder::new(SimConfig::default(), network).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimStats};
pub use snapshot::{ArrivalEvent, BusSnapshot, StopSnapshot, TickSnapshot};
