use crate::domain::group::Group;
use crate::domain::model::{GroupId, VehicleId};
use crate::domain::ports::{GroupStore, VehicleStore};
use crate::domain::vehicle::Vehicle;
use crate::utils::error::{CarPoolError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoredFleet {
    order: Vec<VehicleId>,
    vehicles: HashMap<VehicleId, Vehicle>,
}

/// In-process vehicle store. One writer at a time, readers wait for writes.
#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    inner: RwLock<StoredFleet>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn replace_all(&self, vehicles: Vec<Vehicle>) -> Result<()> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        if !vehicles.iter().all(|vehicle| seen.insert(vehicle.id())) {
            return Err(CarPoolError::PkConflict);
        }

        let mut fleet = self.inner.write().await;
        fleet.order = vehicles.iter().map(Vehicle::id).collect();
        fleet.vehicles = vehicles
            .into_iter()
            .map(|vehicle| (vehicle.id(), vehicle))
            .collect();
        Ok(())
    }

    async fn update(&self, vehicle: Vehicle) -> Result<()> {
        let mut fleet = self.inner.write().await;
        let stored = fleet
            .vehicles
            .get_mut(&vehicle.id())
            .ok_or(CarPoolError::NotFound)?;
        *stored = vehicle;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>> {
        let fleet = self.inner.read().await;
        Ok(fleet
            .order
            .iter()
            .filter_map(|id| fleet.vehicles.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Vehicle> {
        let fleet = self.inner.read().await;
        fleet.vehicles.get(&id).cloned().ok_or(CarPoolError::NotFound)
    }
}

#[derive(Debug)]
struct StoredGroup {
    arrival: u64,
    group: Group,
}

#[derive(Debug, Default)]
struct Groups {
    next_arrival: u64,
    groups: HashMap<GroupId, StoredGroup>,
}

/// In-process group store. Remembers arrival order so waiting groups come
/// back first come, first served.
#[derive(Debug, Default)]
pub struct MemoryGroupStore {
    inner: RwLock<Groups>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for MemoryGroupStore {
    async fn clear(&self) -> Result<()> {
        let mut groups = self.inner.write().await;
        groups.groups.clear();
        groups.next_arrival = 0;
        Ok(())
    }

    async fn add(&self, group: Group) -> Result<()> {
        let mut groups = self.inner.write().await;
        if groups.groups.contains_key(&group.id()) {
            return Err(CarPoolError::PkConflict);
        }
        let arrival = groups.next_arrival;
        groups.next_arrival += 1;
        groups
            .groups
            .insert(group.id(), StoredGroup { arrival, group });
        Ok(())
    }

    async fn update(&self, group: Group) -> Result<()> {
        let mut groups = self.inner.write().await;
        let stored = groups
            .groups
            .get_mut(&group.id())
            .ok_or(CarPoolError::NotFound)?;
        stored.group = group;
        Ok(())
    }

    async fn find_waiting(&self) -> Result<Vec<Group>> {
        let groups = self.inner.read().await;
        let mut waiting: Vec<&StoredGroup> = groups
            .groups
            .values()
            .filter(|stored| !stored.group.is_on_journey())
            .collect();
        waiting.sort_by_key(|stored| stored.arrival);
        Ok(waiting
            .into_iter()
            .map(|stored| stored.group.clone())
            .collect())
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Group> {
        let groups = self.inner.read().await;
        groups
            .groups
            .get(&id)
            .map(|stored| stored.group.clone())
            .ok_or(CarPoolError::NotFound)
    }

    async fn remove_by_id(&self, id: GroupId) -> Result<()> {
        let mut groups = self.inner.write().await;
        groups.groups.remove(&id);
        Ok(())
    }
}
