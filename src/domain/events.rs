use crate::domain::group::Group;
use crate::domain::model::{GroupId, VehicleId};
use crate::domain::vehicle::Vehicle;
use serde::Serialize;
use std::fmt;

/// What a command changed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum DomainEvent {
    #[serde(rename = "vehicle.added")]
    VehicleAdded { vehicle_id: VehicleId, seats: usize },

    #[serde(rename = "group.is.on.journey")]
    GroupOnJourney {
        group_id: GroupId,
        vehicle_id: VehicleId,
        people: usize,
    },

    #[serde(rename = "group.is.waiting")]
    GroupWaiting { group_id: GroupId, people: usize },

    #[serde(rename = "group.dropped.off")]
    GroupDroppedOff {
        group_id: GroupId,
        vehicle_id: Option<VehicleId>,
    },
}

impl DomainEvent {
    pub fn vehicle_added(vehicle: &Vehicle) -> Self {
        DomainEvent::VehicleAdded {
            vehicle_id: vehicle.id(),
            seats: vehicle.capacity().seats(),
        }
    }

    /// `On journey` for a boarded group, `waiting` otherwise.
    pub fn group_requested(group: &Group) -> Self {
        match group.vehicle() {
            Some(vehicle_id) => DomainEvent::GroupOnJourney {
                group_id: group.id(),
                vehicle_id,
                people: group.people(),
            },
            None => DomainEvent::GroupWaiting {
                group_id: group.id(),
                people: group.people(),
            },
        }
    }

    pub fn group_dropped_off(group: &Group) -> Self {
        DomainEvent::GroupDroppedOff {
            group_id: group.id(),
            vehicle_id: group.vehicle(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::VehicleAdded { .. } => "vehicle.added",
            DomainEvent::GroupOnJourney { .. } => "group.is.on.journey",
            DomainEvent::GroupWaiting { .. } => "group.is.waiting",
            DomainEvent::GroupDroppedOff { .. } => "group.dropped.off",
        }
    }
}

impl fmt::Display for DomainEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainEvent::VehicleAdded { vehicle_id, seats } => {
                write!(f, "{} {} ({} seats)", self.name(), vehicle_id, seats)
            }
            DomainEvent::GroupOnJourney {
                group_id,
                vehicle_id,
                people,
            } => write!(
                f,
                "{} {} ({} people) on {}",
                self.name(),
                group_id,
                people,
                vehicle_id
            ),
            DomainEvent::GroupWaiting { group_id, people } => {
                write!(f, "{} {} ({} people)", self.name(), group_id, people)
            }
            DomainEvent::GroupDroppedOff {
                group_id,
                vehicle_id: Some(vehicle_id),
            } => write!(f, "{} {} from {}", self.name(), group_id, vehicle_id),
            DomainEvent::GroupDroppedOff {
                group_id,
                vehicle_id: None,
            } => write!(f, "{} {} while waiting", self.name(), group_id),
        }
    }
}
