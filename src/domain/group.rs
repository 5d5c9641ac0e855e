use crate::domain::model::{GroupId, VehicleId};
use crate::utils::error::{CarPoolError, Result};
use serde::Serialize;

pub const MIN_GROUP_SIZE: i64 = 1;
pub const MAX_GROUP_SIZE: i64 = 6;

/// A set of riders travelling together. Never split across vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    people: usize,
    vehicle: Option<VehicleId>,
}

impl Group {
    pub fn new(id: GroupId, people: i64) -> Result<Self> {
        if !(MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&people) {
            return Err(CarPoolError::InvalidGroupSize { people });
        }
        Ok(Self {
            id,
            people: people as usize,
            vehicle: None,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn people(&self) -> usize {
        self.people
    }

    /// Identity of the vehicle carrying this group, if any.
    pub fn vehicle(&self) -> Option<VehicleId> {
        self.vehicle
    }

    pub fn board(&mut self, vehicle: VehicleId) {
        self.vehicle = Some(vehicle);
    }

    pub fn leave(&mut self) {
        self.vehicle = None;
    }

    pub fn is_on_journey(&self) -> bool {
        self.vehicle.is_some()
    }
}
