use crate::adapters::{MemoryGroupStore, MemoryVehicleStore};
use crate::core::{
    Capacity, DomainEvent, Fleet, Group, GroupId, GroupStore, Result, Vehicle, VehicleId,
    VehicleStore,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A vehicle as requested by fleet initialization, before its seat count is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleEntry {
    pub id: VehicleId,
    pub seats: i64,
}

/// Where a group currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Location {
    Waiting,
    OnJourney {
        vehicle_id: VehicleId,
        capacity: Capacity,
    },
}

/// Runs fleet commands against the stores.
///
/// Every command is a read, allocate, write-back sequence spanning both
/// stores, so commands hold the gate exclusively for their whole duration.
/// `locate` only takes it shared.
pub struct CarPoolEngine<G: GroupStore, V: VehicleStore> {
    groups: G,
    vehicles: V,
    gate: RwLock<()>,
}

impl CarPoolEngine<MemoryGroupStore, MemoryVehicleStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryGroupStore::new(), MemoryVehicleStore::new())
    }
}

impl<G: GroupStore, V: VehicleStore> CarPoolEngine<G, V> {
    pub fn new(groups: G, vehicles: V) -> Self {
        Self {
            groups,
            vehicles,
            gate: RwLock::new(()),
        }
    }

    /// Store of every registered group.
    pub fn groups(&self) -> &G {
        &self.groups
    }

    /// Store of the current fleet.
    pub fn vehicles(&self) -> &V {
        &self.vehicles
    }

    /// Replaces the fleet and forgets every group, waiting or boarded.
    ///
    /// When the groups cannot be cleared the previous fleet is put back.
    pub async fn initialize_fleet(&self, entries: Vec<VehicleEntry>) -> Result<Vec<DomainEvent>> {
        let _gate = self.gate.write().await;

        let vehicles = entries
            .into_iter()
            .map(|entry| Capacity::parse(entry.seats).map(|capacity| Vehicle::new(entry.id, capacity)))
            .collect::<Result<Vec<_>>>()?;
        let events: Vec<DomainEvent> = vehicles.iter().map(DomainEvent::vehicle_added).collect();

        let previous = self.vehicles.find_all().await?;
        self.vehicles.replace_all(vehicles).await?;
        if let Err(e) = self.groups.clear().await {
            if let Err(restore) = self.vehicles.replace_all(previous).await {
                tracing::error!("Failed to restore previous fleet: {}", restore);
            }
            return Err(e);
        }

        tracing::info!("Fleet initialized with {} vehicles", events.len());
        Ok(events)
    }

    /// Registers a group and boards it on a vehicle if one has room for it.
    ///
    /// A failure after registration unregisters the group again, so the
    /// request can be retried with the same id.
    pub async fn request_journey(&self, id: GroupId, people: i64) -> Result<Vec<DomainEvent>> {
        let _gate = self.gate.write().await;

        let group = Group::new(id, people)?;
        self.groups.add(group.clone()).await?;

        let group = match self.place(group).await {
            Ok(group) => group,
            Err(e) => {
                if let Err(discard) = self.groups.remove_by_id(id).await {
                    tracing::error!("Failed to discard group {}: {}", id, discard);
                }
                return Err(e);
            }
        };

        let event = DomainEvent::group_requested(&group);
        tracing::info!("{}", event);
        Ok(vec![event])
    }

    // The group is written before its vehicle, so a failed vehicle write
    // leaves only the group to discard.
    async fn place(&self, group: Group) -> Result<Group> {
        let vehicles = self.vehicles.find_all().await?;
        let waiting = self.groups.find_waiting().await?;
        tracing::debug!(
            "Journey snapshot: {} vehicles, {} waiting groups",
            vehicles.len(),
            waiting.len()
        );

        let mut fleet = Fleet::new(vehicles, waiting);
        let (group, vehicle) = fleet.assign(group);

        if let Some(vehicle) = vehicle {
            self.groups.update(group.clone()).await?;
            self.vehicles.update(vehicle).await?;
        }
        Ok(group)
    }

    /// Destroys a group. When it was on a journey its vehicle is refilled
    /// from the waiting groups.
    ///
    /// If any write fails the vehicle and the refilled groups are restored,
    /// and the group stays where it was.
    pub async fn drop_off(&self, id: GroupId) -> Result<Vec<DomainEvent>> {
        let _gate = self.gate.write().await;

        let group = self.groups.find_by_id(id).await?;
        let waiting = self.groups.find_waiting().await?;
        let vehicle = match group.vehicle() {
            Some(vehicle_id) => Some(self.vehicles.find_by_id(vehicle_id).await?),
            None => None,
        };
        let previous = vehicle.clone();

        let mut fleet = Fleet::new(Vec::new(), waiting);
        let outcome = fleet.drop_off(&group, vehicle)?;

        let mut boarded: Vec<Group> = outcome.boarded.into_values().collect();
        boarded.sort_by_key(Group::people);

        if let Err(e) = self.release(id, outcome.vehicle, &boarded).await {
            self.restore(previous, &boarded).await;
            return Err(e);
        }

        let mut events = vec![DomainEvent::group_dropped_off(&group)];
        events.extend(boarded.iter().map(DomainEvent::group_requested));
        for event in &events {
            tracing::info!("{}", event);
        }
        Ok(events)
    }

    async fn release(&self, id: GroupId, vehicle: Option<Vehicle>, boarded: &[Group]) -> Result<()> {
        if let Some(vehicle) = vehicle {
            self.vehicles.update(vehicle).await?;
        }
        for group in boarded {
            self.groups.update(group.clone()).await?;
        }
        self.groups.remove_by_id(id).await
    }

    async fn restore(&self, vehicle: Option<Vehicle>, boarded: &[Group]) {
        if let Some(vehicle) = vehicle {
            let vehicle_id = vehicle.id();
            if let Err(e) = self.vehicles.update(vehicle).await {
                tracing::error!("Failed to restore vehicle {}: {}", vehicle_id, e);
            }
        }
        for group in boarded {
            let mut group = group.clone();
            group.leave();
            let group_id = group.id();
            if let Err(e) = self.groups.update(group).await {
                tracing::error!("Failed to put group {} back to waiting: {}", group_id, e);
            }
        }
    }

    /// Where a group is, waiting or on which vehicle.
    pub async fn locate(&self, id: GroupId) -> Result<Location> {
        let _gate = self.gate.read().await;

        let group = self.groups.find_by_id(id).await?;
        let Some(vehicle_id) = group.vehicle() else {
            return Ok(Location::Waiting);
        };

        let vehicle = self.vehicles.find_by_id(vehicle_id).await?;
        Ok(Location::OnJourney {
            vehicle_id: vehicle.id(),
            capacity: vehicle.capacity(),
        })
    }
}
