use crate::utils::error::{CarPoolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new id from a random v4 UUID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub const fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(VehicleId);
define_id!(GroupId);

/// Seat count of a vehicle. Only 4, 5 and 6 seat vehicles exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Capacity {
    Four,
    Five,
    Six,
}

impl Capacity {
    pub fn parse(seats: i64) -> Result<Self> {
        match seats {
            4 => Ok(Capacity::Four),
            5 => Ok(Capacity::Five),
            6 => Ok(Capacity::Six),
            _ => Err(CarPoolError::CapacityNotSupported { seats }),
        }
    }

    pub const fn seats(self) -> usize {
        match self {
            Capacity::Four => 4,
            Capacity::Five => 5,
            Capacity::Six => 6,
        }
    }
}

impl From<Capacity> for u8 {
    fn from(capacity: Capacity) -> Self {
        capacity.seats() as u8
    }
}

impl TryFrom<i64> for Capacity {
    type Error = CarPoolError;

    fn try_from(seats: i64) -> Result<Self> {
        Capacity::parse(seats)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} seats", self.seats())
    }
}
