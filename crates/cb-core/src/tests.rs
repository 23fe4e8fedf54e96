//! Unit tests for cb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BusId, LineId, StopId};

    #[test]
    fn index_roundtrip() {
        let id = StopId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StopId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn line_id_overflow_rejected() {
        assert!(LineId::try_from(70_000usize).is_err());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(BusId::INVALID.0, u32::MAX);
        assert_eq!(LineId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(BusId(7).to_string(), "BusId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(47.3769, 8.5417);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(12.0, 24.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(11.0, 22.0));
    }

    #[test]
    fn validity_ranges() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(1_000, 0, 60);
        assert_eq!(clock.current_unix_secs(), 1_000);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 120);
        assert_eq!(clock.current_unix_secs(), 1_120);
        assert_eq!(clock.unix_secs_at(Tick(10)), 1_600);
    }

    #[test]
    fn local_hour_applies_offset() {
        // 1970-01-01 07:30 UTC
        let clock = SimClock::new(7 * 3_600 + 1_800, 0, 60);
        assert!((clock.local_hour() - 7.5).abs() < 1e-9);

        // Same instant seen from UTC−8 is 23:30 the previous day.
        let west = SimClock::new(7 * 3_600 + 1_800, -8 * 3_600, 60);
        assert!((west.local_hour() - 23.5).abs() < 1e-9);
    }

    #[test]
    fn local_hour_wraps_at_midnight() {
        let mut clock = SimClock::new(23 * 3_600, 0, 3_600);
        clock.advance();
        assert_eq!(clock.local_hour(), 0.0);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new(0, 0, 3600);
        for _ in 0..25 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_dhm(), (1, 1, 0));
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.end_tick(), Tick(1_440));
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let cfg = SimConfig { tick_duration_secs: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_alight_range_rejected() {
        let cfg = SimConfig {
            alight_fraction_min: 0.5,
            alight_fraction_max: 0.3,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig { alight_fraction_max: 1.5, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{BusId, EntityRng, StopId};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = EntityRng::for_bus(12345, BusId(0));
        let mut r2 = EntityRng::for_bus(12345, BusId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn bus_and_stop_streams_differ() {
        let mut bus = EntityRng::for_bus(1, BusId(3));
        let mut stop = EntityRng::for_stop(1, StopId(3));
        let a: u64 = bus.random();
        let b: u64 = stop.random();
        assert_ne!(a, b, "bus 3 and stop 3 must not share a stream");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = EntityRng::for_stop(0, StopId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(0.2f64..=0.4);
            assert!((0.2..=0.4).contains(&v));
        }
    }
}

#[cfg(test)]
mod direction {
    use crate::Direction;

    #[test]
    fn flip_is_involution() {
        assert_eq!(Direction::Outbound.flipped(), Direction::Inbound);
        assert_eq!(Direction::Outbound.flipped().flipped(), Direction::Outbound);
    }

    #[test]
    fn numeric_form() {
        assert_eq!(Direction::Outbound.as_u8(), 0);
        assert_eq!(Direction::Inbound.as_u8(), 1);
        assert_eq!(Direction::from_u8(1), Some(Direction::Inbound));
        assert_eq!(Direction::from_u8(2), None);
    }

    #[test]
    fn display() {
        assert_eq!(Direction::Inbound.to_string(), "inbound");
    }
}
