//! Embedded sample network used when no CSV files are given.
//!
//! Two lines through a small lakeside town.  `Town Hall` (S3) is served by
//! both lines and is a single physical stop.
//!
//! ```text
//!  L1:  Harbour ── Market Square ── Town Hall ── Central Station
//!  L2:                University ── Town Hall ── Riverside
//! ```

use std::io::Cursor;

use cb_network::{NetworkResult, TransitNetwork, load_network_reader};

pub const NETWORK_CSV: &str = "\
line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate\n\
L1,Harbour - Central Station,S1,Harbour,47.3550,8.5380,true,2.5\n\
L1,Harbour - Central Station,S2,Market Square,47.3620,8.5410,false,1.8\n\
L1,Harbour - Central Station,S3,Town Hall,47.3700,8.5430,false,2.2\n\
L1,Harbour - Central Station,S4,Central Station,47.3780,8.5400,true,3.0\n\
L2,University - Riverside,S5,University,47.3760,8.5480,true,2.0\n\
L2,University - Riverside,S3,Town Hall,47.3700,8.5430,false,2.2\n\
L2,University - Riverside,S6,Riverside,47.3640,8.5520,true,1.2\n\
";

pub const FLEET_CSV: &str = "\
bus_id,line_id,capacity,initial_position,direction\n\
B101,L1,80,0.0,0\n\
B102,L1,80,0.5,1\n\
B103,L1,80,1.0,0\n\
B201,L2,60,0.0,0\n\
B202,L2,60,0.4,1\n\
";

/// Parse and validate the embedded network.
pub fn sample_network() -> NetworkResult<TransitNetwork> {
    load_network_reader(Cursor::new(NETWORK_CSV), Cursor::new(FLEET_CSV))
}
