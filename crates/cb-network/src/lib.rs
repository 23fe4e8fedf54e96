//! `cb-network`: the static description of a bus network.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`model`]    | `TransitNetwork`, `Line`, `Stop`, `BusSpec`                 |
//! | [`builder`]  | `NetworkBuilder`: collects definitions, validates, builds   |
//! | [`geometry`] | `RouteGeometry`, `RoutePoint`: position ↔ coordinate        |
//! | [`loader`]   | `load_network_csv`, `load_network_reader`                   |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                          |
//!
//! A `TransitNetwork` is built once at startup and never mutated afterwards.
//! The simulation holds it by value and hands out shared references; there
//! is no global configuration state.

pub mod builder;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod model;

#[cfg(test)]
mod tests;

pub use builder::{BusDef, NetworkBuilder, StopDef};
pub use error::{NetworkError, NetworkResult};
pub use geometry::{RouteGeometry, RoutePoint};
pub use loader::{load_network_csv, load_network_reader};
pub use model::{BusSpec, Line, Stop, TransitNetwork};
