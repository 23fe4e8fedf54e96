//! Direction of travel along a line.

/// Which way a bus is traversing its line.
///
/// `Outbound` walks the configured stop list first → last; `Inbound` walks
/// the same stops last → first.  The numeric form (`0` / `1`) is what the
/// snapshot output reports.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Outbound,
    Inbound,
}

impl Direction {
    /// The opposite direction.  Applied at every terminal turnaround.
    #[inline]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Outbound => Direction::Inbound,
            Direction::Inbound  => Direction::Outbound,
        }
    }

    /// `0` for outbound, `1` for inbound.
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            Direction::Outbound => 0,
            Direction::Inbound  => 1,
        }
    }

    /// Inverse of [`as_u8`][Self::as_u8].  Returns `None` for anything other
    /// than `0` or `1`.
    pub fn from_u8(v: u8) -> Option<Direction> {
        match v {
            0 => Some(Direction::Outbound),
            1 => Some(Direction::Inbound),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Outbound => "outbound",
            Direction::Inbound  => "inbound",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
