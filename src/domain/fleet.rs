use crate::domain::group::Group;
use crate::domain::vehicle::{Journeys, Vehicle};
use crate::utils::error::{CarPoolError, Result};

/// Point-in-time allocation view over the vehicles and the waiting groups.
///
/// Built fresh for every command and dropped afterwards. On construction the
/// vehicles are ordered by free seats, most first, and the waiting groups by
/// size, smallest first. Both sorts are stable, so among equally sized
/// waiting groups the one that arrived first is considered first.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    waiting_groups: Vec<Group>,
}

/// Result of releasing a group.
#[derive(Debug, Clone, Default)]
pub struct DropOff {
    /// The vehicle the group left, with any waiting groups it picked up.
    pub vehicle: Option<Vehicle>,
    /// Groups that went from waiting to boarded on that vehicle.
    pub boarded: Journeys,
}

impl Fleet {
    pub fn new(mut vehicles: Vec<Vehicle>, mut waiting_groups: Vec<Group>) -> Self {
        vehicles.sort_by(|a, b| b.availability().cmp(&a.availability()));
        waiting_groups.sort_by_key(Group::people);
        Self {
            vehicles,
            waiting_groups,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn waiting_groups(&self) -> &[Group] {
        &self.waiting_groups
    }

    /// Boards `group` on the first vehicle, in availability order, with room
    /// for all of it. Without one the group comes back unchanged and waiting.
    pub fn assign(&mut self, group: Group) -> (Group, Option<Vehicle>) {
        for vehicle in self.vehicles.iter_mut() {
            let mut candidate = group.clone();
            candidate.board(vehicle.id());
            if vehicle.board(&candidate).is_ok() {
                return (candidate, Some(vehicle.clone()));
            }
        }
        (group, None)
    }

    /// Releases `group`. A waiting group is only removed from the waiting
    /// list; a boarded one leaves `vehicle`, which is then refilled from the
    /// waiting list. No other vehicle is reconsidered.
    pub fn drop_off(&mut self, group: &Group, vehicle: Option<Vehicle>) -> Result<DropOff> {
        let Some(mut vehicle) = vehicle else {
            if self.remove_waiting(|waiting| waiting.id() == group.id()) == 0 {
                return Err(CarPoolError::NotFound);
            }
            return Ok(DropOff::default());
        };

        vehicle.drop_off(group.id())?;
        let boarded = self.rebalance(&mut vehicle)?;

        Ok(DropOff {
            vehicle: Some(vehicle),
            boarded,
        })
    }

    /// Boards waiting groups on `vehicle`, smallest first, skipping the ones
    /// that do not fit, until it is full or the list runs out.
    pub fn rebalance(&mut self, vehicle: &mut Vehicle) -> Result<Journeys> {
        let mut boarded = Journeys::new();

        for waiting in &self.waiting_groups {
            if boarded.contains_key(&waiting.id()) {
                continue;
            }

            let mut candidate = waiting.clone();
            candidate.board(vehicle.id());
            match vehicle.board(&candidate) {
                Ok(()) => {}
                Err(CarPoolError::NotFit) => continue,
                Err(e) => return Err(e),
            }
            boarded.insert(candidate.id(), candidate);

            if vehicle.availability() == 0 {
                break;
            }
        }

        if !boarded.is_empty() {
            self.remove_waiting(|waiting| boarded.contains_key(&waiting.id()));
        }

        Ok(boarded)
    }

    fn remove_waiting(&mut self, mut is_removed: impl FnMut(&Group) -> bool) -> usize {
        let before = self.waiting_groups.len();
        self.waiting_groups.retain(|waiting| !is_removed(waiting));
        before - self.waiting_groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Capacity, GroupId, VehicleId};

    fn group(people: i64) -> Group {
        Group::new(GroupId::new(), people).unwrap()
    }

    fn vehicle(seats: i64) -> Vehicle {
        Vehicle::new(VehicleId::new(), Capacity::parse(seats).unwrap())
    }

    fn vehicle_with(seats: i64, seated: &[i64]) -> Vehicle {
        let mut vehicle = vehicle(seats);
        for people in seated {
            let mut g = group(*people);
            g.board(vehicle.id());
            vehicle.board(&g).unwrap();
        }
        vehicle
    }

    fn ids(groups: &[Group]) -> Vec<GroupId> {
        groups.iter().map(Group::id).collect()
    }

    #[test]
    fn test_new_orders_vehicles_and_waiting_groups() {
        let five = vehicle(5);
        let four = vehicle(4);
        let six = vehicle(6);
        let three = group(3);
        let one = group(1);
        let two = group(2);

        let fleet = Fleet::new(
            vec![five.clone(), four.clone(), six.clone()],
            vec![three.clone(), one.clone(), two.clone()],
        );

        let order: Vec<VehicleId> = fleet.vehicles().iter().map(Vehicle::id).collect();
        assert_eq!(order, vec![six.id(), five.id(), four.id()]);
        assert_eq!(
            ids(fleet.waiting_groups()),
            vec![one.id(), two.id(), three.id()]
        );
    }

    #[test]
    fn test_new_keeps_arrival_order_between_equal_sizes() {
        let first = group(4);
        let small = group(2);
        let second = group(4);
        let a = vehicle(5);
        let b = vehicle(5);

        let fleet = Fleet::new(
            vec![a.clone(), b.clone()],
            vec![first.clone(), small.clone(), second.clone()],
        );

        assert_eq!(
            ids(fleet.waiting_groups()),
            vec![small.id(), first.id(), second.id()]
        );
        assert_eq!(fleet.vehicles()[0].id(), a.id());
        assert_eq!(fleet.vehicles()[1].id(), b.id());
    }

    #[test]
    fn test_assign_group_that_does_not_fit_keeps_waiting() {
        let full = vehicle_with(4, &[4]);
        let mut fleet = Fleet::new(vec![full], vec![]);

        let requested = group(1);
        let (g, assigned) = fleet.assign(requested.clone());

        assert!(!g.is_on_journey());
        assert_eq!(g, requested);
        assert!(assigned.is_none());
    }

    #[test]
    fn test_assign_picks_most_available_vehicle() {
        let four = vehicle(4);
        let six = vehicle(6);
        let mut fleet = Fleet::new(vec![four.clone(), six.clone()], vec![]);

        let (g, assigned) = fleet.assign(group(2));
        let assigned = assigned.unwrap();

        assert_eq!(assigned.id(), six.id());
        assert_eq!(g.vehicle(), Some(six.id()));
        assert_eq!(assigned.availability(), 4);
        assert!(assigned.journeys().contains_key(&g.id()));
    }

    #[test]
    fn test_assign_skips_vehicle_listed_first_with_fewer_seats() {
        let nearly_full = vehicle_with(6, &[3]);
        let four = vehicle(4);
        let mut fleet = Fleet::new(vec![nearly_full, four.clone()], vec![]);

        let (g, assigned) = fleet.assign(group(4));

        assert_eq!(assigned.map(|v| v.id()), Some(four.id()));
        assert_eq!(g.vehicle(), Some(four.id()));
    }

    #[test]
    fn test_assign_is_deterministic_for_equal_availability() {
        let a = vehicle(5);
        let b = vehicle(5);
        for _ in 0..10 {
            let mut fleet = Fleet::new(vec![a.clone(), b.clone()], vec![]);
            let (_, assigned) = fleet.assign(group(3));
            assert_eq!(assigned.unwrap().id(), a.id());
        }
    }

    #[test]
    fn test_rebalance_nothing_fits() {
        let six = group(6);
        let mut fleet = Fleet::new(vec![], vec![six.clone()]);
        let mut freed = vehicle(4);

        let boarded = fleet.rebalance(&mut freed).unwrap();

        assert!(boarded.is_empty());
        assert_eq!(ids(fleet.waiting_groups()), vec![six.id()]);
        assert_eq!(freed.availability(), 4);
    }

    #[test]
    fn test_rebalance_boards_smallest_first_until_full() {
        let two = group(2);
        let three = group(3);
        let one = group(1);
        let six = group(6);
        let mut fleet = Fleet::new(
            vec![],
            vec![two.clone(), three.clone(), one.clone(), six.clone()],
        );
        let mut freed = vehicle(6);

        let boarded = fleet.rebalance(&mut freed).unwrap();

        assert_eq!(boarded.len(), 3);
        for g in [&one, &two, &three] {
            assert_eq!(boarded[&g.id()].vehicle(), Some(freed.id()));
        }
        assert_eq!(ids(fleet.waiting_groups()), vec![six.id()]);
        assert_eq!(freed.availability(), 0);
    }

    #[test]
    fn test_rebalance_skips_groups_that_do_not_fit() {
        let first = group(2);
        let second = group(2);
        let five = group(5);
        let mut fleet = Fleet::new(vec![], vec![five.clone(), first.clone(), second.clone()]);
        let mut freed = vehicle_with(6, &[3]);

        let boarded = fleet.rebalance(&mut freed).unwrap();

        assert_eq!(boarded.len(), 1);
        assert!(boarded.contains_key(&first.id()));
        assert_eq!(ids(fleet.waiting_groups()), vec![second.id(), five.id()]);
        assert_eq!(freed.availability(), 1);
    }

    #[test]
    fn test_rebalance_ignores_duplicate_waiting_entries() {
        let twice = group(2);
        let mut fleet = Fleet::new(vec![], vec![twice.clone(), twice.clone()]);
        let mut freed = vehicle(6);

        let boarded = fleet.rebalance(&mut freed).unwrap();

        assert_eq!(boarded.len(), 1);
        assert_eq!(freed.availability(), 4);
        assert!(fleet.waiting_groups().is_empty());
    }

    #[test]
    fn test_drop_off_unknown_waiting_group() {
        let mut fleet = Fleet::default();
        assert!(matches!(
            fleet.drop_off(&group(2), None),
            Err(CarPoolError::NotFound)
        ));
    }

    #[test]
    fn test_drop_off_waiting_group_removes_it() {
        let two = group(2);
        let six = group(6);
        let mut fleet = Fleet::new(vec![], vec![two.clone(), six.clone()]);

        let outcome = fleet.drop_off(&six, None).unwrap();

        assert!(outcome.vehicle.is_none());
        assert!(outcome.boarded.is_empty());
        assert_eq!(ids(fleet.waiting_groups()), vec![two.id()]);

        assert!(matches!(
            fleet.drop_off(&six, None),
            Err(CarPoolError::NotFound)
        ));
    }

    #[test]
    fn test_drop_off_boarded_group_not_in_vehicle() {
        let mut fleet = Fleet::default();
        let stranger = group(2);
        assert!(matches!(
            fleet.drop_off(&stranger, Some(vehicle(4))),
            Err(CarPoolError::NotFound)
        ));
    }

    #[test]
    fn test_drop_off_boarded_group_without_fitting_waiters() {
        let mut car = vehicle(6);
        let mut leaving = group(2);
        leaving.board(car.id());
        car.board(&leaving).unwrap();
        car.board(&group(2)).unwrap();

        let six = group(6);
        let mut fleet = Fleet::new(vec![], vec![six.clone()]);

        let outcome = fleet.drop_off(&leaving, Some(car)).unwrap();
        let freed = outcome.vehicle.unwrap();

        assert!(outcome.boarded.is_empty());
        assert_eq!(freed.journeys().len(), 1);
        assert_eq!(freed.availability(), 4);
        assert_eq!(ids(fleet.waiting_groups()), vec![six.id()]);
    }

    #[test]
    fn test_drop_off_boarded_group_refills_vehicle() {
        let mut car = vehicle(6);
        let mut leaving = group(2);
        leaving.board(car.id());
        car.board(&leaving).unwrap();
        car.board(&group(2)).unwrap();

        let a = group(2);
        let b = group(2);
        let six = group(6);
        let mut fleet = Fleet::new(vec![], vec![a.clone(), b.clone(), six.clone()]);

        let outcome = fleet.drop_off(&leaving, Some(car)).unwrap();
        let freed = outcome.vehicle.unwrap();

        assert_eq!(freed.journeys().len(), 3);
        assert_eq!(freed.availability(), 0);
        assert_eq!(outcome.boarded.len(), 2);
        assert!(outcome.boarded.contains_key(&a.id()));
        assert!(outcome.boarded.contains_key(&b.id()));
        assert!(!freed.journeys().contains_key(&leaving.id()));
        assert_eq!(ids(fleet.waiting_groups()), vec![six.id()]);
    }
}
