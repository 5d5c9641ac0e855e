pub mod engine;
pub mod scenario;

pub use crate::domain::events::DomainEvent;
pub use crate::domain::fleet::{DropOff, Fleet};
pub use crate::domain::group::Group;
pub use crate::domain::model::{Capacity, GroupId, VehicleId};
pub use crate::domain::ports::{GroupStore, VehicleStore};
pub use crate::domain::vehicle::{Journeys, Vehicle};
pub use crate::utils::error::Result;
