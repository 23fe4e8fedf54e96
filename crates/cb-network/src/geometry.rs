//! Route geometry: normalised position ↔ coordinate and next stop.
//!
//! # Position model
//!
//! A bus position is a scalar in `[0, 1]` measuring how far it is into the
//! *current directional traversal*, by along-route distance:
//!
//! ```text
//! outbound:  stop 0 ──── stop 1 ──────── stop 2        position = x / L
//! inbound:   stop 2 ──── stop 1 ──────── stop 0        position = (L − x) / L
//! ```
//!
//! where `x` is the outbound along-route distance from stop 0 and `L` the
//! total route length.  Stop `k` *in directional order* sits at
//! [`boundary(direction, k)`][RouteGeometry::boundary]; the first boundary is
//! exactly `0.0` and the last exactly `1.0` in both directions.
//!
//! Segments are straight lines between consecutive stops.  Lengths use the
//! haversine distance; interpolation is linear in lat/lon.

use cb_core::{Direction, GeoPoint};

/// Result of [`RouteGeometry::locate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoutePoint {
    /// Interpolated coordinate.
    pub coord: GeoPoint,
    /// Index (into the line's stop list) of the next stop ahead.
    pub next_stop: usize,
    /// Along-route metres from the current position to `next_stop`.
    pub distance_to_next_m: f64,
}

/// Precomputed along-route distances for one line.
#[derive(Clone, Debug)]
pub struct RouteGeometry {
    points:   Vec<GeoPoint>,
    /// `cum_m[i]` = outbound distance from stop 0 to stop `i`.
    cum_m:    Vec<f64>,
    length_m: f64,
}

impl RouteGeometry {
    /// Build from the line's stop coordinates in outbound order.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        let mut cum_m = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                acc += points[i - 1].distance_m(*p);
            }
            cum_m.push(acc);
        }
        Self { points, cum_m, length_m: acc }
    }

    /// Total route length in metres.
    #[inline]
    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    #[inline]
    pub fn stop_count(&self) -> usize {
        self.points.len()
    }

    /// Map the `k`-th stop of a directional traversal to its index in the
    /// configured (outbound) stop list.
    #[inline]
    pub fn physical_index(&self, direction: Direction, k: usize) -> usize {
        match direction {
            Direction::Outbound => k,
            Direction::Inbound  => self.points.len() - 1 - k,
        }
    }

    /// Normalised position of the `k`-th stop of a directional traversal.
    pub fn boundary(&self, direction: Direction, k: usize) -> f64 {
        let n = self.points.len();
        if k + 1 >= n {
            return 1.0;
        }
        if k == 0 || self.length_m <= 0.0 {
            return 0.0;
        }
        match direction {
            Direction::Outbound => self.cum_m[k] / self.length_m,
            Direction::Inbound  => (self.length_m - self.cum_m[n - 1 - k]) / self.length_m,
        }
    }

    /// All stop boundaries of a traversal, in directional order.
    pub fn boundaries(&self, direction: Direction) -> Vec<f64> {
        (0..self.points.len()).map(|k| self.boundary(direction, k)).collect()
    }

    /// Directional ordinal of the next stop strictly ahead of `position`.
    ///
    /// A stop whose boundary equals `position` has already been reached, so
    /// it is skipped.  At `1.0` there is nothing ahead; the final stop of the
    /// traversal is returned.
    pub fn next_ordinal(&self, direction: Direction, position: f64) -> usize {
        let n = self.points.len();
        (0..n)
            .find(|&k| self.boundary(direction, k) > position)
            .unwrap_or(n.saturating_sub(1))
    }

    /// Physical `(from, to)` stop indices of the segment containing
    /// `position`, in travel order.
    pub fn segment_at(&self, direction: Direction, position: f64) -> (usize, usize) {
        let k = self.next_ordinal(direction, position).max(1);
        (
            self.physical_index(direction, k - 1),
            self.physical_index(direction, k),
        )
    }

    /// Interpolated coordinate, next stop, and distance to it.
    pub fn locate(&self, position: f64, direction: Direction) -> RoutePoint {
        let position = position.clamp(0.0, 1.0);
        self.locate_toward(position, direction, self.next_ordinal(direction, position))
    }

    /// Like [`locate`][Self::locate], but heading for the directional
    /// ordinal `k` instead of the first stop strictly ahead.  Differs only
    /// when stops share a boundary and some of them are still to be served.
    pub fn locate_toward(&self, position: f64, direction: Direction, k: usize) -> RoutePoint {
        let position = position.clamp(0.0, 1.0);
        let k = k.min(self.points.len().saturating_sub(1));
        let remaining = (self.boundary(direction, k) - position).max(0.0) * self.length_m;

        RoutePoint {
            coord:              self.coord_at(position, direction),
            next_stop:          self.physical_index(direction, k),
            distance_to_next_m: remaining,
        }
    }

    /// Coordinate at `position` of a traversal.
    pub fn coord_at(&self, position: f64, direction: Direction) -> GeoPoint {
        let along = position.clamp(0.0, 1.0) * self.length_m;
        let x = match direction {
            Direction::Outbound => along,
            Direction::Inbound  => self.length_m - along,
        };

        // First stop at or beyond `x`; the segment ends there.
        let j = self.cum_m.partition_point(|&c| c < x);
        if j == 0 {
            return self.points[0];
        }
        if j >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let i = j - 1;
        let seg = self.cum_m[j] - self.cum_m[i];
        if seg <= 0.0 {
            return self.points[j];
        }
        self.points[i].lerp(self.points[j], (x - self.cum_m[i]) / seg)
    }
}
