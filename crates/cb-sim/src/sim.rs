//! The `Sim` struct and its tick loop.

use std::sync::atomic::{AtomicBool, Ordering};

use cb_core::{BusId, SimClock, SimConfig, Tick};
use cb_demand::{ArrivalModel, StopStore, TimeOfDayProfile};
use cb_fleet::{AlightingPolicy, FleetError, FleetStore, MovementEngine, SpeedModel, StopVisit, board_and_alight};
use cb_network::TransitNetwork;

use crate::{ArrivalEvent, BusSnapshot, SimError, SimObserver, SimResult, StopSnapshot, TickSnapshot};

// ── Run statistics ────────────────────────────────────────────────────────────

/// Cumulative passenger flows since tick 0.
///
/// Conservation holds after every tick:
///
/// ```text
/// generated = waiting + boarded
/// boarded   = on_board + alighted
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimStats {
    pub ticks:       u64,
    pub generated:   u64,
    pub boarded:     u64,
    pub alighted:    u64,
    pub stop_visits: u64,
    pub turnarounds: u64,
}

impl SimStats {
    fn record(&mut self, visit: &StopVisit) {
        self.boarded += visit.boarded as u64;
        self.alighted += visit.alighted as u64;
        self.stop_visits += 1;
        if visit.turnaround {
            self.turnarounds += 1;
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<A, S>` owns the network, every stop's and bus's state, and the
/// models that drive them.  `A` turns expected arrivals into counts, `S`
/// picks bus speeds; both are compile-time parameters, use `Box<dyn ...>`
/// to choose at runtime.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: ArrivalModel, S: SpeedModel> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: SimConfig,

    /// Simulation clock; tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Immutable lines, stops, and fleet description.
    pub network: TransitNetwork,

    /// Waiting passengers per stop.
    pub stops: StopStore,

    /// Dynamic state of every bus.
    pub fleet: FleetStore,

    pub profile: TimeOfDayProfile,
    pub arrivals: A,
    pub speed: S,
    pub policy: AlightingPolicy,

    pub stats: SimStats,
}

impl<A: ArrivalModel, S: SpeedModel> Sim<A, S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        log::info!("run complete at {}", self.clock);
        observer.on_sim_end(self.clock.current_tick, &self.stats);
        Ok(())
    }

    /// Like [`run`][Self::run], but stops early once `shutdown` is set.
    ///
    /// The flag is read only between ticks, so a tick is never half
    /// applied.  Returns the tick at which the run stopped.
    pub fn run_until<O: SimObserver>(&mut self, observer: &mut O, shutdown: &AtomicBool) -> SimResult<Tick> {
        while self.clock.current_tick < self.config.end_tick() {
            if shutdown.load(Ordering::Relaxed) {
                log::info!("shutdown requested, stopping at {}", self.clock);
                break;
            }
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick, &self.stats);
        Ok(self.clock.current_tick)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick and emit its events.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let visits = self.process_tick(now, observer)?;
        self.clock.advance();
        self.stats.ticks += 1;

        let interval = self.config.output_interval_ticks;
        if interval > 0 && self.clock.current_tick.0.is_multiple_of(interval) {
            observer.on_snapshot(&self.snapshot());
        }
        observer.on_tick_end(now, visits);
        Ok(())
    }

    /// The current state of every bus and stop.
    ///
    /// Pure: calling it twice without stepping yields equal snapshots.
    pub fn snapshot(&self) -> TickSnapshot {
        let timestamp = self.clock.current_unix_secs();

        let buses = self
            .network
            .buses
            .iter()
            .zip(&self.fleet.buses)
            .map(|(spec, bus)| {
                let line = self.network.line(bus.line);
                // The bus's own ordinal, so a stop sharing a boundary with
                // one already served is still reported as next.
                let at = line.geometry.locate_toward(bus.position, bus.direction, bus.next_ordinal);

                BusSnapshot {
                    bus_id:             spec.code.clone(),
                    line_id:            line.code.clone(),
                    timestamp,
                    lat:                at.coord.lat,
                    lon:                at.coord.lon,
                    passengers:         bus.passengers,
                    capacity:           bus.capacity,
                    next_stop_id:       self.network.stop(line.stops[at.next_stop]).code.clone(),
                    distance_to_next_m: at.distance_to_next_m,
                    speed_kmh:          bus.speed_kmh,
                    direction:          bus.direction.as_u8(),
                }
            })
            .collect();

        let stops = self
            .network
            .stops
            .iter()
            .map(|stop| StopSnapshot {
                stop_id:  stop.code.clone(),
                timestamp,
                waiting:  self.stops.waiting(stop.id),
                line_ids: stop.lines.iter().map(|&l| self.network.line(l).code.clone()).collect(),
            })
            .collect();

        TickSnapshot { tick: self.clock.current_tick.0, timestamp, buses, stops }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        let tick_secs = self.config.tick_duration_secs;
        let timestamp = self.clock.unix_secs_at(now);

        // ── Phase 1: stops ────────────────────────────────────────────────
        let hour = self.clock.local_hour();
        let added = self.stops.generate(&self.network, &self.arrivals, &self.profile, hour, tick_secs);
        self.stats.generated += added;

        // ── Phase 2: buses, ascending BusId ───────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access.
        let network = &self.network;
        let stops   = &mut self.stops;
        let policy  = &self.policy;
        let speed   = &self.speed;
        let stats   = &mut self.stats;
        let mut visits = 0usize;

        for i in 0..self.fleet.len() {
            let id = BusId(i as u32);
            let (bus, rng) = self.fleet.split_mut(id);
            bus.speed_kmh = speed.sample_kmh(rng).max(0.0);

            let outcome = MovementEngine::advance(bus, network, tick_secs as f64, |bus, point| {
                let visit = board_and_alight(id, bus, point, stops, policy, rng)?;
                stats.record(&visit);
                visits += 1;
                observer.on_arrival(&arrival_event(network, id, &visit, timestamp));
                Ok::<(), FleetError>(())
            })?;

            if outcome.turned_around {
                log::debug!("{now}: bus {} completed trip {}", network.bus(id).code, bus.trips_completed);
            }
        }

        // ── Phase 3: whole-network checks ─────────────────────────────────
        self.check_invariants(now)?;

        log::debug!(
            "{now}: +{added} passengers, {visits} stop visits, {} waiting, {} on board",
            self.stops.total_waiting(),
            self.fleet.total_passengers()
        );
        Ok(visits)
    }

    /// Verify occupancy bounds and passenger conservation.
    pub fn check_invariants(&self, now: Tick) -> SimResult<()> {
        let violation = |detail: String| SimError::InvariantViolation { tick: now.0, detail };

        if let Some((i, bus)) = self
            .fleet
            .buses
            .iter()
            .enumerate()
            .find(|(_, b)| b.passengers > b.capacity)
        {
            return Err(violation(format!(
                "bus {} carries {} over capacity {}",
                self.network.buses[i].code, bus.passengers, bus.capacity
            )));
        }

        let waiting = self.stops.total_waiting();
        let on_board = self.fleet.total_passengers();
        if self.stats.generated != waiting + self.stats.boarded {
            return Err(violation(format!(
                "generated {} != waiting {waiting} + boarded {}",
                self.stats.generated, self.stats.boarded
            )));
        }
        if self.stats.boarded != on_board + self.stats.alighted {
            return Err(violation(format!(
                "boarded {} != on board {on_board} + alighted {}",
                self.stats.boarded, self.stats.alighted
            )));
        }
        Ok(())
    }
}

fn arrival_event(network: &TransitNetwork, bus: BusId, visit: &StopVisit, timestamp: i64) -> ArrivalEvent {
    let spec = network.bus(bus);
    ArrivalEvent {
        bus_id:         spec.code.clone(),
        line_id:        network.line(spec.line).code.clone(),
        stop_id:        network.stop(visit.stop).code.clone(),
        timestamp,
        boarded:        visit.boarded,
        alighted:       visit.alighted,
        bus_passengers: visit.passengers,
        stop_waiting:   visit.waiting_after,
        terminal:       visit.terminal,
    }
}
