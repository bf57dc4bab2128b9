//! Opaque identifiers for buses, lines and thermal units.
//!
//! These mirror the newtype-ID pattern used throughout `gat_core` (`BusId`,
//! `BranchId`, ...): a thin `Copy` wrapper around an integer so that bus,
//! line and unit identifiers cannot be confused with each other or with
//! plain matrix indices.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[inline]
            pub fn new(value: u64) -> Self {
                $name(value)
            }

            #[inline]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                $name(value)
            }
        }
    };
}

newtype_id!(BusId);
newtype_id!(LineId);
newtype_id!(UnitId);
