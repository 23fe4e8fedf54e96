//! `cb-core`: foundational types for the `citybus` simulator.
//!
//! This crate is a dependency of every other `cb-*` crate.  It has no `cb-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LineId`, `StopId`, `BusId`                           |
//! | [`geo`]         | `GeoPoint`, haversine distance, interpolation         |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `EntityRng` (per-bus / per-stop)                      |
//! | [`direction`]   | `Direction` enum                                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `SimConfig` from JSON.                    |

pub mod direction;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{BusId, LineId, StopId};
pub use rng::EntityRng;
pub use time::{SimClock, SimConfig, Tick};
