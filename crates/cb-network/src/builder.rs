//! Builder for constructing a validated [`TransitNetwork`].

use std::collections::{HashMap, HashSet};

use cb_core::{BusId, Direction, GeoPoint, LineId, StopId};

use crate::{BusSpec, Line, NetworkError, NetworkResult, RouteGeometry, Stop, TransitNetwork};

/// One stop as listed on a line, before resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct StopDef {
    pub code:         String,
    pub name:         String,
    pub pos:          GeoPoint,
    pub terminal:     bool,
    pub arrival_rate: f64,
}

/// One bus before resolution.  `line` is the line *code*.
#[derive(Clone, Debug, PartialEq)]
pub struct BusDef {
    pub code:             String,
    pub line:             String,
    pub capacity:         u32,
    pub initial_position: f64,
    pub direction:        Direction,
}

struct LineDef {
    code:  String,
    name:  String,
    stops: Vec<StopDef>,
}

/// Incrementally collects lines, stops, and buses.
///
/// Nothing is validated until [`build`][Self::build], which reports the first
/// problem found, naming the offending entity.
///
/// # Example
///
/// ```rust,ignore
/// let mut b = NetworkBuilder::new();
/// let l1 = b.add_line("L1", "Harbour – Station");
/// b.add_stop(l1, StopDef { code: "S1".into(), terminal: true, .. });
/// b.add_stop(l1, StopDef { code: "S2".into(), terminal: true, .. });
/// b.add_bus(BusDef { code: "B1".into(), line: "L1".into(), capacity: 80, .. });
/// let network = b.build()?;
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    lines: Vec<LineDef>,
    buses: Vec<BusDef>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a line and return its id.  Stops are appended with
    /// [`add_stop`][Self::add_stop] in outbound order.
    pub fn add_line(&mut self, code: impl Into<String>, name: impl Into<String>) -> LineId {
        let id = LineId(self.lines.len() as u16);
        self.lines.push(LineDef {
            code:  code.into(),
            name:  name.into(),
            stops: Vec::new(),
        });
        id
    }

    /// Append a stop to the end of `line`'s outbound sequence.
    pub fn add_stop(&mut self, line: LineId, stop: StopDef) {
        self.lines[line.index()].stops.push(stop);
    }

    pub fn add_bus(&mut self, bus: BusDef) {
        self.buses.push(bus);
    }

    /// Id of a previously added line, looked up by code.
    pub fn line_id(&self, code: &str) -> Option<LineId> {
        self.lines
            .iter()
            .position(|l| l.code == code)
            .map(|i| LineId(i as u16))
    }

    /// Validate everything and resolve codes to typed ids.
    pub fn build(self) -> NetworkResult<TransitNetwork> {
        if self.lines.len() >= LineId::INVALID.index() {
            return Err(NetworkError::Parse(format!(
                "{} lines exceed the supported maximum",
                self.lines.len()
            )));
        }

        let mut line_codes: HashSet<&str> = HashSet::new();
        let mut stop_index: HashMap<String, StopId> = HashMap::new();
        let mut stops: Vec<Stop> = Vec::new();
        let mut lines: Vec<Line> = Vec::with_capacity(self.lines.len());

        // ── Lines and their stops ─────────────────────────────────────────
        for (li, def) in self.lines.iter().enumerate() {
            let line_id = LineId(li as u16);

            if def.code.is_empty() {
                return Err(NetworkError::MissingField {
                    entity: format!("line #{}", li + 1),
                    field:  "line_id",
                });
            }
            if !line_codes.insert(def.code.as_str()) {
                return Err(NetworkError::DuplicateLine(def.code.clone()));
            }
            if def.stops.len() < 2 {
                return Err(NetworkError::TooFewStops {
                    line:  def.code.clone(),
                    count: def.stops.len(),
                });
            }
            if !def.stops.iter().any(|s| s.terminal) {
                return Err(NetworkError::NoTerminal(def.code.clone()));
            }

            let mut seen: HashSet<&str> = HashSet::new();
            let mut line_stops = Vec::with_capacity(def.stops.len());

            for sd in &def.stops {
                validate_stop(&def.code, sd)?;
                if !seen.insert(sd.code.as_str()) {
                    return Err(NetworkError::DuplicateStopOnLine {
                        line: def.code.clone(),
                        stop: sd.code.clone(),
                    });
                }

                let id = match stop_index.get(&sd.code) {
                    Some(&id) => {
                        check_shared_stop(&stops[id.index()], sd)?;
                        id
                    }
                    None => {
                        let id = StopId(stops.len() as u32);
                        stops.push(Stop {
                            id,
                            code:         sd.code.clone(),
                            name:         sd.name.clone(),
                            pos:          sd.pos,
                            terminal:     sd.terminal,
                            arrival_rate: sd.arrival_rate,
                            lines:        Vec::new(),
                        });
                        stop_index.insert(sd.code.clone(), id);
                        id
                    }
                };
                stops[id.index()].lines.push(line_id);
                line_stops.push(id);
            }

            let geometry = RouteGeometry::new(def.stops.iter().map(|s| s.pos).collect());
            if geometry.length_m() <= 0.0 {
                return Err(NetworkError::DegenerateRoute(def.code.clone()));
            }

            for end in [def.stops.first(), def.stops.last()].into_iter().flatten() {
                if !end.terminal {
                    log::warn!(
                        "line {}: endpoint stop {} is not flagged terminal; buses still turn there",
                        def.code, end.code
                    );
                }
            }

            lines.push(Line {
                id:    line_id,
                code:  def.code.clone(),
                name:  def.name.clone(),
                stops: line_stops,
                geometry,
            });
        }

        // ── Fleet ─────────────────────────────────────────────────────────
        let mut bus_codes: HashSet<&str> = HashSet::new();
        let mut buses = Vec::with_capacity(self.buses.len());

        for (bi, bd) in self.buses.iter().enumerate() {
            if bd.code.is_empty() {
                return Err(NetworkError::MissingField {
                    entity: format!("bus #{}", bi + 1),
                    field:  "bus_id",
                });
            }
            if !bus_codes.insert(bd.code.as_str()) {
                return Err(NetworkError::DuplicateBus(bd.code.clone()));
            }
            let Some(line) = lines.iter().find(|l| l.code == bd.line) else {
                return Err(NetworkError::UnknownLine {
                    bus:  bd.code.clone(),
                    line: bd.line.clone(),
                });
            };
            if bd.capacity == 0 {
                return Err(NetworkError::InvalidCapacity {
                    bus:      bd.code.clone(),
                    capacity: 0,
                });
            }
            if !(0.0..=1.0).contains(&bd.initial_position) {
                return Err(NetworkError::InvalidPosition {
                    bus:      bd.code.clone(),
                    position: bd.initial_position,
                });
            }

            // Position 1.0 is the far terminal; express it as the start of the
            // return traversal so the bus can move on the first tick.
            let (initial_position, initial_direction) = if bd.initial_position >= 1.0 {
                log::debug!("bus {}: starting at end of {} traversal, flipped", bd.code, bd.direction);
                (0.0, bd.direction.flipped())
            } else {
                (bd.initial_position, bd.direction)
            };

            buses.push(BusSpec {
                id: BusId(bi as u32),
                code: bd.code.clone(),
                line: line.id,
                capacity: bd.capacity,
                initial_position,
                initial_direction,
            });
        }

        log::info!(
            "network built: {} lines, {} stops, {} buses",
            lines.len(),
            stops.len(),
            buses.len()
        );

        Ok(TransitNetwork { lines, stops, buses })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate_stop(line: &str, sd: &StopDef) -> NetworkResult<()> {
    if sd.code.is_empty() {
        return Err(NetworkError::MissingField {
            entity: format!("a stop on line {line:?}"),
            field:  "stop_id",
        });
    }
    if !sd.pos.is_valid() {
        return Err(NetworkError::CoordinateOutOfRange {
            stop: sd.code.clone(),
            lat:  sd.pos.lat,
            lon:  sd.pos.lon,
        });
    }
    if !sd.arrival_rate.is_finite() || sd.arrival_rate < 0.0 {
        return Err(NetworkError::InvalidArrivalRate {
            stop: sd.code.clone(),
            rate: sd.arrival_rate,
        });
    }
    Ok(())
}

/// A stop listed by several lines must be described identically each time.
fn check_shared_stop(existing: &Stop, sd: &StopDef) -> NetworkResult<()> {
    let field = if existing.name != sd.name {
        Some("name")
    } else if existing.pos != sd.pos {
        Some("coordinate")
    } else if existing.terminal != sd.terminal {
        Some("terminal flag")
    } else if existing.arrival_rate != sd.arrival_rate {
        Some("arrival rate")
    } else {
        None
    };
    match field {
        Some(field) => Err(NetworkError::ConflictingStop { stop: sd.code.clone(), field }),
        None => Ok(()),
    }
}
