//! `cb-demand`: how passengers appear at stops.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`profile`] | `TimeOfDayProfile`, `DemandBand`: hour-keyed multipliers      |
//! | [`model`]   | `ArrivalModel` trait, `PoissonArrivals`, `ExpectedArrivals`   |
//! | [`store`]   | `StopStore`: per-stop waiting counts and RNGs                 |
//! | [`error`]   | `DemandError`, `DemandResult<T>`                              |
//!
//! # Arrival process
//!
//! Between ticks each stop receives new passengers with mean
//!
//! ```text
//! expected = base_rate × multiplier(local hour) × tick_secs / 60
//! ```
//!
//! drawn from a Poisson distribution (default) or rounded deterministically.
//! Arrivals only ever increase the waiting count; only boarding
//! ([`StopStore::board`]) decreases it.

pub mod error;
pub mod model;
pub mod profile;
pub mod store;


pub use error::{DemandError, DemandResult};
pub use model::{ArrivalModel, ExpectedArrivals, PoissonArrivals, expected_arrivals};
pub use profile::{DemandBand, TimeOfDayProfile};
pub use store::StopStore;
