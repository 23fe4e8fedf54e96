//! Strongly typed, zero-cost identifier wrappers.
//!
//! Ids are dense indices assigned at load time in configuration order.  The
//! human-readable codes from the configuration files (`"L1"`, `"S42"`, …)
//! live on the entities themselves and are what the output writers emit.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a bus line in the network.  A city rarely runs more than a
    /// few hundred lines, so `u16` is plenty.
    pub struct LineId(u16);
}

typed_id! {
    /// Index of a physical stop.  Stops shared by several lines have one id.
    pub struct StopId(u32);
}

typed_id! {
    /// Index of a bus in the fleet.
    pub struct BusId(u32);
}
