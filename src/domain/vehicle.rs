use crate::domain::group::Group;
use crate::domain::model::{Capacity, GroupId, VehicleId};
use crate::utils::error::{CarPoolError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Groups seated in a vehicle, keyed by group id.
pub type Journeys = HashMap<GroupId, Group>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    id: VehicleId,
    capacity: Capacity,
    journeys: Journeys,
}

impl Vehicle {
    pub fn new(id: VehicleId, capacity: Capacity) -> Self {
        Self {
            id,
            capacity,
            journeys: Journeys::new(),
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn journeys(&self) -> &Journeys {
        &self.journeys
    }

    pub fn seated(&self) -> usize {
        self.journeys.values().map(Group::people).sum()
    }

    pub fn availability(&self) -> usize {
        self.capacity.seats() - self.seated()
    }

    /// Seats `group` if its whole size fits in the free seats.
    pub fn board(&mut self, group: &Group) -> Result<()> {
        if self.availability() < group.people() {
            return Err(CarPoolError::NotFit);
        }
        self.journeys.insert(group.id(), group.clone());
        Ok(())
    }

    /// Unseats the group and hands it back without its vehicle reference.
    pub fn drop_off(&mut self, id: GroupId) -> Result<Group> {
        let mut group = self.journeys.remove(&id).ok_or(CarPoolError::NotFound)?;
        group.leave();
        Ok(group)
    }
}
