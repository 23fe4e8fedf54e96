//! `cb-fleet`: buses and how they move.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`state`]    | `BusState`: position, direction, occupancy, speed               |
//! | [`store`]    | `FleetStore`: `Vec<BusState>` + per-bus RNGs                    |
//! | [`speed`]    | `SpeedModel` trait, `ConstantSpeed`, `UniformSpeed`             |
//! | [`engine`]   | `MovementEngine`: advance along the route, detect stop crossings  |
//! | [`boarding`] | `AlightingPolicy`, `resolve_transfer`, `board_and_alight`       |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                                  |
//!
//! # Movement model
//!
//! 1. Each tick the bus covers `speed_kmh / 3.6 × tick_secs` metres.
//! 2. [`MovementEngine::advance`] walks that distance stop by stop; every
//!    stop reached calls the arrival callback *before* movement continues,
//!    so several stops per tick are handled in route order.
//! 3. Reaching the last stop of a traversal is a terminal turnaround: full
//!    alight, boarding, direction flip, position reset to `0.0`.  The rest of
//!    the tick is spent at the terminal.

pub mod boarding;
pub mod engine;
pub mod error;
pub mod speed;
pub mod state;
pub mod store;


pub use boarding::{AlightingPolicy, StopVisit, Transfer, board_and_alight, resolve_transfer};
pub use engine::{AdvanceOutcome, ArrivalPoint, MovementEngine};
pub use error::{FleetError, FleetResult};
pub use speed::{ConstantSpeed, SpeedModel, UniformSpeed};
pub use state::BusState;
pub use store::FleetStore;
