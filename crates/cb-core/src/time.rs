//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! The feeders run with short ticks (the default is 60 s), and the arrival
//! model needs the *local* hour of day, so the clock also carries a fixed
//! UTC offset.  There is no timezone database; daylight-saving changes are
//! not modelled.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts, Unix seconds, and local hour of day.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// Offset of local time from UTC, in seconds (e.g. `-18_000` for UTC−5).
    pub utc_offset_secs: i32,
    /// How many real seconds one tick represents.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_unix_secs: i64, utc_offset_secs: i32, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            utc_offset_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Current Unix timestamp corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs()
    }

    /// Unix timestamp of an arbitrary `tick` on this clock.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs + tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Fractional local hour of day in `[0, 24)` at `current_tick`.
    ///
    /// 07:30 local → `7.5`.
    pub fn local_hour(&self) -> f64 {
        let local = self.current_unix_secs() + self.utc_offset_secs as i64;
        local.rem_euclid(86_400) as f64 / 3_600.0
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} +{:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Runtime parameters of a simulation run.
///
/// Loaded from JSON by the feeder binary (with the `serde` feature) and/or
/// assembled from command-line flags.  Missing JSON fields fall back to
/// [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp for tick 0.
    pub start_unix_secs: i64,

    /// Local-time offset from UTC in seconds, used for the time-of-day
    /// arrival multiplier.
    pub utc_offset_secs: i32,

    /// Seconds per tick.  Default: 60.
    pub tick_duration_secs: u32,

    /// Total ticks to simulate.  One service day at 60 s ticks is 1 440.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a snapshot every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,

    /// Lower bound of the share of passengers leaving at a non-terminal stop.
    pub alight_fraction_min: f64,

    /// Upper bound of the share of passengers leaving at a non-terminal stop.
    pub alight_fraction_max: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:       0,
            utc_offset_secs:       0,
            tick_duration_secs:    60,
            total_ticks:           1_440,
            seed:                  42,
            output_interval_ticks: 1,
            alight_fraction_min:   0.2,
            alight_fraction_max:   0.4,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.utc_offset_secs, self.tick_duration_secs)
    }

    /// Reject parameter combinations the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(CoreError::Config("tick_duration_secs must be > 0".into()));
        }
        if self.utc_offset_secs.abs() > 14 * 3_600 {
            return Err(CoreError::Config(format!(
                "utc_offset_secs {} is outside ±14 h",
                self.utc_offset_secs
            )));
        }
        let (lo, hi) = (self.alight_fraction_min, self.alight_fraction_max);
        if !(lo.is_finite() && hi.is_finite()) || lo < 0.0 || hi > 1.0 || lo > hi {
            return Err(CoreError::Config(format!(
                "alighting fraction range [{lo}, {hi}] must satisfy 0 <= min <= max <= 1"
            )));
        }
        Ok(())
    }
}
