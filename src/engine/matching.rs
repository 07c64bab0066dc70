use tracing::debug;

use crate::model::*;

use super::Dispatch;

impl Dispatch {
    /// Put `group` into `car`. Caller guarantees `group.people <= car.seats_available`.
    /// Returns the updated car, or `None` with nothing changed when either side is unknown.
    pub(super) fn seat(&mut self, car: Car, group: Group) -> Option<Car> {
        debug_assert!(
            group.people <= car.seats_available,
            "group {} ({} people) does not fit car {} ({} free)",
            group.id,
            group.people,
            car.id,
            car.seats_available
        );
        let updated = self.cars.apply_seat_delta(car.id, -(group.people as i8))?;
        if self.groups.assign(group.id, car.id).is_none() {
            self.cars.apply_seat_delta(car.id, group.people as i8);
            return None;
        }
        Some(updated)
    }

    /// Fill freed seats in `car_id` from the wait queues, earliest arrival
    /// first among the groups that fit, until nothing else fits.
    /// Returns the number of groups seated.
    pub(super) fn rematch(&mut self, car_id: CarId) -> usize {
        let mut seated = 0;
        loop {
            self.groups.prune();
            let Some(car) = self.cars.lookup(car_id) else {
                break;
            };
            let Some(candidate) = self.groups.select_candidate(car.seats_available) else {
                break;
            };
            let Some(car) = self.seat(car, candidate) else {
                break;
            };
            self.groups.pop(candidate.people);
            debug!(
                group_id = candidate.id,
                car_id,
                arrival = candidate.arrival,
                seats_available = car.seats_available,
                "rematched waiting group"
            );
            seated += 1;
        }
        seated
    }
}
