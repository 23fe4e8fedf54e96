//! Configuration errors.  Every variant names the offending entity so the
//! feeder can report exactly what to fix before refusing to start.

use thiserror::Error;

/// Errors produced while loading or validating a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{entity} is missing required field `{field}`")]
    MissingField { entity: String, field: &'static str },

    #[error("line {0:?} is defined more than once")]
    DuplicateLine(String),

    #[error("line {line:?} is named both {first:?} and {second:?}")]
    ConflictingLineName { line: String, first: String, second: String },

    #[error("stop {stop:?} appears more than once on line {line:?}")]
    DuplicateStopOnLine { line: String, stop: String },

    #[error("bus {0:?} is defined more than once")]
    DuplicateBus(String),

    #[error("line {line:?} has {count} stop(s); at least 2 are required")]
    TooFewStops { line: String, count: usize },

    #[error("line {0:?} has no stop marked terminal")]
    NoTerminal(String),

    #[error("line {0:?} has zero route length (all stops share one coordinate)")]
    DegenerateRoute(String),

    #[error("stop {stop:?} coordinate ({lat}, {lon}) is outside [-90,90] x [-180,180]")]
    CoordinateOutOfRange { stop: String, lat: f64, lon: f64 },

    #[error("stop {stop:?} arrival rate {rate} must be finite and >= 0")]
    InvalidArrivalRate { stop: String, rate: f64 },

    #[error("stop {stop:?} is shared by several lines but its {field} differs between them")]
    ConflictingStop { stop: String, field: &'static str },

    #[error("bus {bus:?} capacity {capacity} must be > 0")]
    InvalidCapacity { bus: String, capacity: i64 },

    #[error("bus {bus:?} initial position {position} is outside [0, 1]")]
    InvalidPosition { bus: String, position: f64 },

    #[error("bus {bus:?} references unknown line {line:?}")]
    UnknownLine { bus: String, line: String },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
