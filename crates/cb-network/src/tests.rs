//! Unit tests for cb-network.
//!
//! All tests use small hand-written networks.

#[cfg(test)]
mod helpers {
    use cb_core::{Direction, GeoPoint};

    use crate::{BusDef, NetworkBuilder, StopDef, TransitNetwork};

    pub fn stop(code: &str, lat: f64, lon: f64, terminal: bool) -> StopDef {
        StopDef {
            code:         code.into(),
            name:         format!("{code} stop"),
            pos:          GeoPoint::new(lat, lon),
            terminal,
            arrival_rate: 1.0,
        }
    }

    pub fn bus(code: &str, line: &str) -> BusDef {
        BusDef {
            code:             code.into(),
            line:             line.into(),
            capacity:         80,
            initial_position: 0.0,
            direction:        Direction::Outbound,
        }
    }

    /// Three stops due north, unequal spacing: S1 → S2 is 1/3 of the route,
    /// S2 → S3 is 2/3.
    ///
    /// ```text
    /// S1 (0.00) ── S2 (0.01) ──── S3 (0.03)   degrees latitude
    /// ```
    pub fn three_stop_builder() -> NetworkBuilder {
        let mut b = NetworkBuilder::new();
        let l1 = b.add_line("L1", "North line");
        b.add_stop(l1, stop("S1", 0.00, 0.0, true));
        b.add_stop(l1, stop("S2", 0.01, 0.0, false));
        b.add_stop(l1, stop("S3", 0.03, 0.0, true));
        b.add_bus(bus("B1", "L1"));
        b
    }

    pub fn three_stop_network() -> TransitNetwork {
        three_stop_builder().build().unwrap()
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cb_core::{BusId, Direction, LineId, StopId};

    use super::helpers::*;
    use crate::{NetworkBuilder, NetworkError};

    #[test]
    fn resolves_ids_in_order() {
        let net = three_stop_network();
        assert_eq!(net.line_count(), 1);
        assert_eq!(net.stop_count(), 3);
        assert_eq!(net.bus_count(), 1);
        assert_eq!(net.line(LineId(0)).stops, vec![StopId(0), StopId(1), StopId(2)]);
        assert_eq!(net.bus(BusId(0)).line, LineId(0));
        assert_eq!(net.stop_by_code("S2").unwrap().id, StopId(1));
    }

    #[test]
    fn shared_stop_has_one_id_and_both_lines() {
        let mut b = three_stop_builder();
        let l2 = b.add_line("L2", "Cross line");
        b.add_stop(l2, stop("S2", 0.01, 0.0, false));
        b.add_stop(l2, stop("S4", 0.01, 0.02, true));
        let net = b.build().unwrap();

        assert_eq!(net.stop_count(), 4);
        let s2 = net.stop_by_code("S2").unwrap();
        assert_eq!(s2.lines, vec![LineId(0), LineId(1)]);
    }

    #[test]
    fn conflicting_shared_stop_rejected() {
        let mut b = three_stop_builder();
        let l2 = b.add_line("L2", "Cross line");
        b.add_stop(l2, stop("S2", 0.02, 0.0, false)); // moved coordinate
        b.add_stop(l2, stop("S4", 0.01, 0.02, true));
        let err = b.build().unwrap_err();
        assert!(matches!(err, NetworkError::ConflictingStop { field: "coordinate", .. }), "{err}");
    }

    #[test]
    fn duplicate_line_rejected() {
        let mut b = three_stop_builder();
        let again = b.add_line("L1", "Again");
        b.add_stop(again, stop("X1", 1.0, 1.0, true));
        b.add_stop(again, stop("X2", 1.1, 1.0, true));
        assert!(matches!(b.build(), Err(NetworkError::DuplicateLine(code)) if code == "L1"));
    }

    #[test]
    fn duplicate_stop_on_line_rejected() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L1", "Loop");
        b.add_stop(l, stop("S1", 0.0, 0.0, true));
        b.add_stop(l, stop("S2", 0.01, 0.0, false));
        b.add_stop(l, stop("S1", 0.0, 0.0, true));
        assert!(matches!(b.build(), Err(NetworkError::DuplicateStopOnLine { .. })));
    }

    #[test]
    fn duplicate_bus_rejected() {
        let mut b = three_stop_builder();
        b.add_bus(bus("B1", "L1"));
        assert!(matches!(b.build(), Err(NetworkError::DuplicateBus(code)) if code == "B1"));
    }

    #[test]
    fn single_stop_line_rejected() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L1", "Stub");
        b.add_stop(l, stop("S1", 0.0, 0.0, true));
        assert!(matches!(b.build(), Err(NetworkError::TooFewStops { count: 1, .. })));
    }

    #[test]
    fn line_without_terminal_rejected() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L1", "Open");
        b.add_stop(l, stop("S1", 0.0, 0.0, false));
        b.add_stop(l, stop("S2", 0.01, 0.0, false));
        assert!(matches!(b.build(), Err(NetworkError::NoTerminal(code)) if code == "L1"));
    }

    #[test]
    fn zero_length_route_rejected() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L1", "Nowhere");
        b.add_stop(l, stop("S1", 1.0, 1.0, true));
        b.add_stop(l, stop("S2", 1.0, 1.0, true));
        assert!(matches!(b.build(), Err(NetworkError::DegenerateRoute(_))));
    }

    #[test]
    fn coordinate_out_of_range_rejected() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L1", "Polar");
        b.add_stop(l, stop("S1", 91.0, 0.0, true));
        b.add_stop(l, stop("S2", 0.0, 0.0, true));
        let err = b.build().unwrap_err();
        assert!(matches!(err, NetworkError::CoordinateOutOfRange { ref stop, .. } if stop == "S1"));
        assert!(err.to_string().contains("S1"));
    }

    #[test]
    fn negative_arrival_rate_rejected() {
        let mut b = NetworkBuilder::new();
        let l = b.add_line("L1", "Line");
        let mut s1 = stop("S1", 0.0, 0.0, true);
        s1.arrival_rate = -1.0;
        b.add_stop(l, s1);
        b.add_stop(l, stop("S2", 0.01, 0.0, true));
        assert!(matches!(b.build(), Err(NetworkError::InvalidArrivalRate { .. })));
    }

    #[test]
    fn bus_on_unknown_line_rejected() {
        let mut b = three_stop_builder();
        b.add_bus(bus("B2", "L9"));
        let err = b.build().unwrap_err();
        assert!(matches!(err, NetworkError::UnknownLine { ref bus, ref line } if bus == "B2" && line == "L9"));
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut b = three_stop_builder();
        let mut b2 = bus("B2", "L1");
        b2.capacity = 0;
        b.add_bus(b2);
        assert!(matches!(b.build(), Err(NetworkError::InvalidCapacity { .. })));
    }

    #[test]
    fn position_outside_unit_interval_rejected() {
        for position in [-0.1, 1.01, f64::NAN] {
            let mut b = three_stop_builder();
            let mut b2 = bus("B2", "L1");
            b2.initial_position = position;
            b.add_bus(b2);
            assert!(matches!(b.build(), Err(NetworkError::InvalidPosition { .. })), "{position}");
        }
    }

    #[test]
    fn position_one_is_normalised_to_return_trip() {
        let mut b = three_stop_builder();
        let mut b2 = bus("B2", "L1");
        b2.initial_position = 1.0;
        b.add_bus(b2);
        let net = b.build().unwrap();
        let spec = net.bus_by_code("B2").unwrap();
        assert_eq!(spec.initial_position, 0.0);
        assert_eq!(spec.initial_direction, Direction::Inbound);
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geometry {
    use cb_core::{Direction, GeoPoint, LineId};

    use super::helpers::*;
    use crate::NetworkBuilder;

    const EPS: f64 = 1e-9;

    #[test]
    fn boundaries_follow_distance_share() {
        let net = three_stop_network();
        let g = &net.line(LineId(0)).geometry;

        let out = g.boundaries(Direction::Outbound);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 1.0 / 3.0).abs() < 1e-4, "{out:?}");
        assert_eq!(out[2], 1.0);

        let inb = g.boundaries(Direction::Inbound);
        assert_eq!(inb[0], 0.0);
        assert!((inb[1] - 2.0 / 3.0).abs() < 1e-4, "{inb:?}");
        assert_eq!(inb[2], 1.0);
    }

    #[test]
    fn length_matches_haversine() {
        let net = three_stop_network();
        let g = &net.line(LineId(0)).geometry;
        let direct = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.03, 0.0));
        assert!((g.length_m() - direct).abs() < 1e-6);
    }

    #[test]
    fn start_of_traversal_locates_first_stop() {
        let net = three_stop_network();
        let g = &net.line(LineId(0)).geometry;

        let p = g.locate(0.0, Direction::Outbound);
        assert_eq!(p.coord, GeoPoint::new(0.0, 0.0));
        assert_eq!(p.next_stop, 1);

        let p = g.locate(0.0, Direction::Inbound);
        assert_eq!(p.coord, GeoPoint::new(0.03, 0.0));
        assert_eq!(p.next_stop, 1);
    }

    #[test]
    fn exact_boundary_counts_as_arrived() {
        let net = three_stop_network();
        let g = &net.line(LineId(0)).geometry;
        let at_s2 = g.boundary(Direction::Outbound, 1);

        let p = g.locate(at_s2, Direction::Outbound);
        assert_eq!(p.next_stop, 2, "S2 reached, S3 is next");
        assert!((p.coord.lat - 0.01).abs() < EPS);

        let before = g.locate(at_s2 - 1e-6, Direction::Outbound);
        assert_eq!(before.next_stop, 1);
    }

    #[test]
    fn distance_to_next_stop() {
        let net = three_stop_network();
        let g = &net.line(LineId(0)).geometry;
        let seg = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.01, 0.0));

        let p = g.locate(0.0, Direction::Outbound);
        assert!((p.distance_to_next_m - seg).abs() < 1e-6);

        let end = g.locate(1.0, Direction::Outbound);
        assert_eq!(end.next_stop, 2);
        assert_eq!(end.distance_to_next_m, 0.0);
    }

    #[test]
    fn locate_toward_serves_stops_sharing_a_boundary() {
        let mut b = NetworkBuilder::new();
        let l1 = b.add_line("L1", "North line");
        b.add_stop(l1, stop("S1", 0.00, 0.0, true));
        b.add_stop(l1, stop("S1b", 0.00, 0.0, false));
        b.add_stop(l1, stop("S2", 0.01, 0.0, true));
        let net = b.build().unwrap();
        let g = &net.line(LineId(0)).geometry;

        assert_eq!(g.locate(0.0, Direction::Outbound).next_stop, 2);

        let p = g.locate_toward(0.0, Direction::Outbound, 1);
        assert_eq!(p.next_stop, 1);
        assert_eq!(p.distance_to_next_m, 0.0);
        assert_eq!(p.coord, GeoPoint::new(0.0, 0.0));
        assert_eq!(g.locate_toward(0.0, Direction::Outbound, 2), g.locate(0.0, Direction::Outbound));
    }

    #[test]
    fn inbound_walks_stops_in_reverse() {
        let net = three_stop_network();
        let line = net.line(LineId(0));
        assert_eq!(line.stop_at(Direction::Inbound, 0), line.stops[2]);
        assert_eq!(line.end_stop(Direction::Inbound), line.stops[0]);
        assert_eq!(line.end_stop(Direction::Outbound), line.stops[2]);

        // Halfway inbound is inside the long S3 → S2 segment.
        let p = line.geometry.locate(0.5, Direction::Inbound);
        assert_eq!(p.next_stop, 1);
        assert!((p.coord.lat - 0.015).abs() < 1e-6, "{}", p.coord);
    }

    /// Every interpolated point lies on the segment between the two stops
    /// bracketing it in travel order.
    #[test]
    fn interpolation_stays_on_correct_segment() {
        let net = three_stop_network();
        let line = net.line(LineId(0));
        let g = &line.geometry;
        let pts: Vec<GeoPoint> = line.stops.iter().map(|&s| net.stop(s).pos).collect();

        for direction in [Direction::Outbound, Direction::Inbound] {
            for i in 0..=100 {
                let p = i as f64 / 100.0;
                let (from, to) = g.segment_at(direction, p);
                assert_eq!(from.abs_diff(to), 1, "consecutive stops");

                let c = g.coord_at(p, direction);
                let (a, b) = (pts[from], pts[to]);
                let lo = a.lat.min(b.lat) - EPS;
                let hi = a.lat.max(b.lat) + EPS;
                assert!(c.lat >= lo && c.lat <= hi, "{direction} p={p}: {c} not in [{a}, {b}]");
                assert!((c.lon - a.lon).abs() < EPS);
            }
        }
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use cb_core::Direction;

    use crate::{NetworkError, load_network_reader};

    const NETWORK_CSV: &str = "\
line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate
L1,Harbour - Station,S1,Harbour,47.3660,8.5410,true,2.5
L1,Harbour - Station,S2,Market,47.3700,8.5400,no,1.8
L1,Harbour - Station,S3,Station,47.3780,8.5400,YES,1.0
L2,Ring,S2,Market,47.3700,8.5400,no,1.8
L2,Ring,S4,Park,47.3700,8.5500,1,0.4
";

    const FLEET_CSV: &str = "\
bus_id,line_id,capacity,initial_position,direction
B1,L1,80,0.0,0
B2,L1,60,0.5,1
B3,L2,40,0.25,
";

    #[test]
    fn loads_lines_stops_and_fleet() {
        let net = load_network_reader(Cursor::new(NETWORK_CSV), Cursor::new(FLEET_CSV)).unwrap();
        assert_eq!(net.line_count(), 2);
        assert_eq!(net.stop_count(), 4);
        assert_eq!(net.bus_count(), 3);

        let s3 = net.stop_by_code("S3").unwrap();
        assert!(s3.terminal);
        assert_eq!(s3.arrival_rate, 1.0);
        assert_eq!(net.stop_by_code("S2").unwrap().lines.len(), 2);

        let b2 = net.bus_by_code("B2").unwrap();
        assert_eq!(b2.capacity, 60);
        assert_eq!(b2.initial_direction, Direction::Inbound);
        assert_eq!(net.bus_by_code("B3").unwrap().initial_direction, Direction::Outbound);
    }

    #[test]
    fn direction_column_is_optional() {
        let fleet = "bus_id,line_id,capacity,initial_position\nB1,L1,80,0.1\n";
        let net = load_network_reader(Cursor::new(NETWORK_CSV), Cursor::new(fleet)).unwrap();
        assert_eq!(net.bus(cb_core::BusId(0)).initial_direction, Direction::Outbound);
    }

    #[test]
    fn negative_capacity_names_bus() {
        let fleet = "bus_id,line_id,capacity,initial_position\nB7,L1,-5,0.0\n";
        let err = load_network_reader(Cursor::new(NETWORK_CSV), Cursor::new(fleet)).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidCapacity { ref bus, capacity: -5 } if bus == "B7"));
    }

    #[test]
    fn bad_direction_rejected() {
        let fleet = "bus_id,line_id,capacity,initial_position,direction\nB1,L1,80,0.0,2\n";
        let err = load_network_reader(Cursor::new(NETWORK_CSV), Cursor::new(fleet)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn renamed_line_block_rejected() {
        let network = "\
line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate
L1,Harbour line,S1,Harbour,47.3660,8.5410,true,2.5
L1,Harbour line,S2,Market,47.3700,8.5400,true,1.8
L1,Airport line,S9,Airport,47.4500,8.5600,true,0.5
";
        let err = load_network_reader(Cursor::new(network), Cursor::new("")).unwrap_err();
        assert!(
            matches!(err, NetworkError::ConflictingLineName { ref line, ref second, .. }
                if line == "L1" && second == "Airport line"),
            "{err}"
        );
    }

    #[test]
    fn reopened_line_block_is_a_duplicate() {
        let network = "\
line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate
L1,Harbour line,S1,Harbour,47.3660,8.5410,true,2.5
L1,Harbour line,S2,Market,47.3700,8.5400,true,1.8
L2,Ring,S4,Park,47.3700,8.5500,true,0.4
L2,Ring,S5,Zoo,47.3750,8.5500,true,0.4
L1,Harbour line,S9,Airport,47.4500,8.5600,true,0.5
";
        let err = load_network_reader(Cursor::new(network), Cursor::new("")).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateLine(ref l) if l == "L1"), "{err}");
    }

    #[test]
    fn bad_terminal_flag_rejected() {
        let network = "\
line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate
L1,Line,S1,One,0.0,0.0,maybe,1.0
L1,Line,S2,Two,0.01,0.0,true,1.0
";
        let err = load_network_reader(Cursor::new(network), Cursor::new(FLEET_CSV)).unwrap_err();
        assert!(err.to_string().contains("S1"), "{err}");
    }

    #[test]
    fn malformed_number_reports_row() {
        let network = "\
line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate
L1,Line,S1,One,north,0.0,true,1.0
";
        let err = load_network_reader(Cursor::new(network), Cursor::new("")).unwrap_err();
        assert!(err.to_string().contains("network row 1"), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let missing = std::path::Path::new("/definitely/not/here.csv");
        let err = crate::load_network_csv(missing, missing).unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
