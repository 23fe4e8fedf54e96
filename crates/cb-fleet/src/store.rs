//! The `FleetStore`: every bus's state and RNG.

use cb_core::{BusId, EntityRng};
use cb_network::TransitNetwork;

use crate::BusState;

/// Bus states and per-bus RNG streams, indexed by `BusId`.
///
/// The RNGs live beside the states (not inside them) so callers can borrow a
/// bus mutably and its RNG mutably at the same time, see
/// [`split_mut`][Self::split_mut].
pub struct FleetStore {
    pub buses: Vec<BusState>,
    rngs:      Vec<EntityRng>,
}

impl FleetStore {
    pub fn new(network: &TransitNetwork, seed: u64) -> Self {
        let buses = network
            .buses
            .iter()
            .map(|spec| BusState::from_spec(spec, &network.line(spec.line).geometry))
            .collect();
        let rngs = network
            .buses
            .iter()
            .map(|spec| EntityRng::for_bus(seed, spec.id))
            .collect();
        Self { buses, rngs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    #[inline]
    pub fn get(&self, bus: BusId) -> &BusState {
        &self.buses[bus.index()]
    }

    /// Disjoint mutable borrows of a bus and its RNG.
    #[inline]
    pub fn split_mut(&mut self, bus: BusId) -> (&mut BusState, &mut EntityRng) {
        (&mut self.buses[bus.index()], &mut self.rngs[bus.index()])
    }

    /// Passengers currently on board across the fleet.
    pub fn total_passengers(&self) -> u64 {
        self.buses.iter().map(|b| b.passengers as u64).sum()
    }
}
