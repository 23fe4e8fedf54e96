//! The `StopStore`: per-stop waiting counts.

use cb_core::{EntityRng, StopId};
use cb_network::TransitNetwork;

use crate::{ArrivalModel, DemandError, DemandResult, TimeOfDayProfile, expected_arrivals};

/// Waiting passengers at every stop, plus each stop's RNG stream.
///
/// Vectors are indexed by `StopId` and always have length `stop_count`.
pub struct StopStore {
    /// Current waiting count per stop.
    waiting: Vec<u32>,

    /// Cumulative passengers generated per stop since the run started.
    pub generated: Vec<u64>,

    rngs: Vec<EntityRng>,
}

impl StopStore {
    /// Every stop starts empty.
    pub fn new(network: &TransitNetwork, seed: u64) -> Self {
        let n = network.stop_count();
        Self {
            waiting:   vec![0; n],
            generated: vec![0; n],
            rngs:      (0..n).map(|i| EntityRng::for_stop(seed, StopId(i as u32))).collect(),
        }
    }

    #[inline]
    pub fn waiting(&self, stop: StopId) -> u32 {
        self.waiting[stop.index()]
    }

    /// All waiting counts, indexed by `StopId`.
    #[inline]
    pub fn all_waiting(&self) -> &[u32] {
        &self.waiting
    }

    /// Overwrite one stop's waiting count (scenario setup, tests).
    pub fn set_waiting(&mut self, stop: StopId, count: u32) {
        self.waiting[stop.index()] = count;
    }

    /// Add one tick's worth of new passengers at every stop.
    ///
    /// `hour` is the local hour at the start of the tick.  Returns the total
    /// number of passengers added across all stops.  A stop whose waiting
    /// count would pass `u32::MAX` saturates there, and only the passengers
    /// actually added are counted as generated.
    pub fn generate<M: ArrivalModel + ?Sized>(
        &mut self,
        network:   &TransitNetwork,
        model:     &M,
        profile:   &TimeOfDayProfile,
        hour:      f64,
        tick_secs: u32,
    ) -> u64 {
        let multiplier = profile.multiplier(hour);
        let mut total = 0u64;

        for (i, stop) in network.stops.iter().enumerate() {
            let expected = expected_arrivals(stop.arrival_rate, multiplier, tick_secs);
            let new = model.sample(expected, &mut self.rngs[i]);
            let before = self.waiting[i];
            // Stochastic output is the one place clamping is acceptable.
            self.waiting[i] = before.saturating_add(new);
            let added = (self.waiting[i] - before) as u64;
            self.generated[i] += added;
            total += added;
        }
        total
    }

    /// Remove `count` boarding passengers from `stop`.
    ///
    /// Boarding is computed from the waiting count, so asking for more than
    /// are waiting is a logic error and is reported rather than clamped.
    /// Returns the remaining waiting count.
    pub fn board(&mut self, stop: StopId, count: u32) -> DemandResult<u32> {
        let waiting = self.waiting[stop.index()];
        let remaining = waiting.checked_sub(count).ok_or(DemandError::InsufficientWaiting {
            stop,
            waiting,
            requested: count,
        })?;
        self.waiting[stop.index()] = remaining;
        Ok(remaining)
    }

    /// Total passengers waiting across the network.
    pub fn total_waiting(&self) -> u64 {
        self.waiting.iter().map(|&w| w as u64).sum()
    }
}
