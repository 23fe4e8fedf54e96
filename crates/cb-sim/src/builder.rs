//! Fluent builder for constructing a [`Sim`].

use cb_core::SimConfig;
use cb_demand::{ArrivalModel, PoissonArrivals, StopStore, TimeOfDayProfile};
use cb_fleet::{AlightingPolicy, ConstantSpeed, FleetStore, SpeedModel};
use cb_network::TransitNetwork;

use crate::{Sim, SimError, SimResult, SimStats};

/// Fluent builder for [`Sim<A, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick duration, …
/// - [`TransitNetwork`]: from [`cb_network::NetworkBuilder`] or the CSV loader
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                          |
/// |-----------------|----------------------------------|
/// | `.arrivals(m)`  | `PoissonArrivals`                |
/// | `.speed(m)`     | `ConstantSpeed(25.0)`            |
/// | `.profile(p)`   | `TimeOfDayProfile::default()`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network)
///     .arrivals(ExpectedArrivals)
///     .speed(UniformSpeed::new(18.0, 32.0)?)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<A: ArrivalModel, S: SpeedModel> {
    config:   SimConfig,
    network:  TransitNetwork,
    arrivals: A,
    speed:    S,
    profile:  TimeOfDayProfile,
}

impl SimBuilder<PoissonArrivals, ConstantSpeed> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, network: TransitNetwork) -> Self {
        Self {
            config,
            network,
            arrivals: PoissonArrivals,
            speed:    ConstantSpeed::default(),
            profile:  TimeOfDayProfile::default(),
        }
    }
}

impl<A: ArrivalModel, S: SpeedModel> SimBuilder<A, S> {
    /// Replace the arrival model.
    pub fn arrivals<A2: ArrivalModel>(self, arrivals: A2) -> SimBuilder<A2, S> {
        SimBuilder {
            config:  self.config,
            network: self.network,
            arrivals,
            speed:   self.speed,
            profile: self.profile,
        }
    }

    /// Replace the speed model.
    pub fn speed<S2: SpeedModel>(self, speed: S2) -> SimBuilder<A, S2> {
        SimBuilder {
            config:   self.config,
            network:  self.network,
            arrivals: self.arrivals,
            speed,
            profile:  self.profile,
        }
    }

    pub fn profile(mut self, profile: TimeOfDayProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Validate the configuration, create per-stop and per-bus state, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<A, S>> {
        self.config.validate()?;
        if self.config.total_ticks == 0 {
            log::warn!("total_ticks is 0: the run will emit nothing");
        }
        let policy = AlightingPolicy::new(self.config.alight_fraction_min, self.config.alight_fraction_max)
            .map_err(|e| SimError::Config(e.to_string()))?;

        let stops = StopStore::new(&self.network, self.config.seed);
        let fleet = FleetStore::new(&self.network, self.config.seed);

        log::info!(
            "sim ready: {} buses on {} lines, {} stops, {} ticks of {} s, seed {}",
            self.network.bus_count(),
            self.network.line_count(),
            self.network.stop_count(),
            self.config.total_ticks,
            self.config.tick_duration_secs,
            self.config.seed
        );

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            network:  self.network,
            stops,
            fleet,
            profile:  self.profile,
            arrivals: self.arrivals,
            speed:    self.speed,
            policy,
            stats:    SimStats::default(),
        })
    }
}
