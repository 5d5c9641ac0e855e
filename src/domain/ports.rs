use crate::domain::group::Group;
use crate::domain::model::{GroupId, VehicleId};
use crate::domain::vehicle::Vehicle;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Replaces the whole fleet. Fails with `PkConflict` on a repeated id.
    async fn replace_all(&self, vehicles: Vec<Vehicle>) -> Result<()>;
    /// Fails with `NotFound` for a vehicle that is not stored.
    async fn update(&self, vehicle: Vehicle) -> Result<()>;
    /// Vehicles in the order the fleet was initialized.
    async fn find_all(&self) -> Result<Vec<Vehicle>>;
    async fn find_by_id(&self, id: VehicleId) -> Result<Vehicle>;
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn clear(&self) -> Result<()>;
    /// Fails with `PkConflict` when the id is already stored.
    async fn add(&self, group: Group) -> Result<()>;
    /// Fails with `NotFound` for a group that is not stored.
    async fn update(&self, group: Group) -> Result<()>;
    /// Groups without a vehicle, in the order they were added.
    async fn find_waiting(&self) -> Result<Vec<Group>>;
    async fn find_by_id(&self, id: GroupId) -> Result<Group>;
    /// Removing an absent id is not an error.
    async fn remove_by_id(&self, id: GroupId) -> Result<()>;
}
