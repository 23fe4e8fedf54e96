//! `cb-output`: simulation output writers for the citybus simulator.
//!
//! Two backends are provided:
//!
//! | Backend      | Files created                                                        |
//! |--------------|----------------------------------------------------------------------|
//! | CSV          | `bus_snapshots.csv`, `stop_snapshots.csv`, `arrival_events.csv`      |
//! | JSON lines   | `bus_snapshots.jsonl`, `stop_snapshots.jsonl`, `arrival_events.jsonl` |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `cb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cb_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if obs.failures() > 0 { ... }
//! ```

pub mod csv;
pub mod error;
pub mod jsonl;
pub mod observer;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use jsonl::JsonLinesWriter;
pub use observer::SimOutputObserver;
pub use writer::OutputWriter;
