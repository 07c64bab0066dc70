use std::collections::{HashMap, HashSet};

use crate::limits::SEAT_BUCKETS;
use crate::model::*;

/// Owns the fleet and the seat pool: bucket `k` holds the ids of cars with
/// exactly `k + 1` free seats. Full cars sit in no bucket.
#[derive(Debug)]
pub struct CarRegistry {
    cars: HashMap<CarId, Car>,
    pools: [HashSet<CarId>; SEAT_BUCKETS],
    /// Free seats across the fleet, kept in step with every seat change.
    free_seats: u64,
}

impl Default for CarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CarRegistry {
    pub fn new() -> Self {
        Self {
            cars: HashMap::new(),
            pools: Default::default(),
            free_seats: 0,
        }
    }

    /// Replace the whole fleet. Every car starts empty.
    pub fn load(&mut self, fleet: &[CarInfo]) {
        self.cars.clear();
        for pool in &mut self.pools {
            pool.clear();
        }
        self.free_seats = 0;
        self.cars.reserve(fleet.len());
        for info in fleet {
            let car = Car::new(info.id, info.seats);
            self.pools[bucket(car.seats_available)].insert(car.id);
            self.free_seats += car.seats_available as u64;
            self.cars.insert(car.id, car);
        }
    }

    pub fn lookup(&self, id: CarId) -> Option<Car> {
        self.cars.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.values()
    }

    /// Any car with at least `min_seats` free. Scans buckets upward from the
    /// exact fit; which car wins inside a bucket is unspecified.
    pub fn find_any_with_capacity(&self, min_seats: u8) -> Option<Car> {
        self.pools[bucket(min_seats)..]
            .iter()
            .find_map(|pool| pool.iter().next())
            .and_then(|id| self.lookup(*id))
    }

    /// Move `seats_available` by `delta` and re-file the car in the pool.
    /// Returns the updated car, or `None` for an unknown id.
    pub fn apply_seat_delta(&mut self, id: CarId, delta: i8) -> Option<Car> {
        let car = self.cars.get_mut(&id)?;
        if car.seats_available > 0 {
            self.pools[bucket(car.seats_available)].remove(&id);
        }
        let updated = car.seats_available as i16 + delta as i16;
        debug_assert!(
            (0..=car.seats_total as i16).contains(&updated),
            "car {id}: seat delta {delta} leaves {updated} of {} seats",
            car.seats_total
        );
        let previous = car.seats_available;
        car.seats_available = updated.clamp(0, car.seats_total as i16) as u8;
        self.free_seats = self.free_seats + car.seats_available as u64 - previous as u64;
        if car.seats_available > 0 {
            self.pools[bucket(car.seats_available)].insert(id);
        }
        Some(*car)
    }

    /// Bucket currently holding `id`, if any.
    pub fn pool_of(&self, id: CarId) -> Option<usize> {
        self.pools.iter().position(|pool| pool.contains(&id))
    }

    pub fn seats_available(&self) -> u64 {
        self.free_seats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet(cars: &[(CarId, u8)]) -> CarRegistry {
        let infos: Vec<CarInfo> = cars.iter().map(|&(id, seats)| CarInfo { id, seats }).collect();
        let mut reg = CarRegistry::new();
        reg.load(&infos);
        reg
    }

    #[test]
    fn load_files_cars_by_total_seats() {
        let reg = fleet(&[(1, 4), (2, 6), (3, 1)]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.pool_of(1), Some(3));
        assert_eq!(reg.pool_of(2), Some(5));
        assert_eq!(reg.pool_of(3), Some(0));
    }

    #[test]
    fn load_replaces_previous_fleet() {
        let mut reg = fleet(&[(1, 4), (2, 6)]);
        reg.load(&[CarInfo { id: 9, seats: 2 }]);
        assert_eq!(reg.len(), 1);
        assert!(reg.lookup(1).is_none());
        assert_eq!(reg.pool_of(2), None);
        assert_eq!(reg.pool_of(9), Some(1));
    }

    #[test]
    fn lookup_unknown_car() {
        let reg = fleet(&[(1, 4)]);
        assert_eq!(reg.lookup(2), None);
    }

    #[test]
    fn find_prefers_nothing_below_request() {
        let reg = fleet(&[(1, 2), (2, 3)]);
        assert_eq!(reg.find_any_with_capacity(3).map(|c| c.id), Some(2));
        assert!(reg.find_any_with_capacity(4).is_none());
    }

    #[test]
    fn find_takes_smallest_sufficient_bucket() {
        let reg = fleet(&[(1, 6), (2, 3)]);
        assert_eq!(reg.find_any_with_capacity(2).map(|c| c.id), Some(2));
    }

    #[test]
    fn find_on_empty_fleet() {
        let reg = CarRegistry::new();
        assert!(reg.is_empty());
        for seats in 1..=6 {
            assert!(reg.find_any_with_capacity(seats).is_none());
        }
    }

    #[test]
    fn seat_delta_moves_between_buckets() {
        let mut reg = fleet(&[(1, 4)]);

        let car = reg.apply_seat_delta(1, -3).unwrap();
        assert_eq!(car.seats_available, 1);
        assert_eq!(reg.pool_of(1), Some(0));

        let car = reg.apply_seat_delta(1, -1).unwrap();
        assert_eq!(car.seats_available, 0);
        assert_eq!(reg.pool_of(1), None);
        assert!(reg.find_any_with_capacity(1).is_none());

        let car = reg.apply_seat_delta(1, 4).unwrap();
        assert_eq!(car.seats_available, 4);
        assert_eq!(reg.pool_of(1), Some(3));
    }

    #[test]
    fn seat_delta_unknown_car() {
        let mut reg = fleet(&[(1, 4)]);
        assert!(reg.apply_seat_delta(5, -1).is_none());
        assert_eq!(reg.lookup(1).unwrap().seats_available, 4);
    }

    fn recount(reg: &CarRegistry) -> u64 {
        reg.cars().map(|c| c.seats_available as u64).sum()
    }

    #[test]
    fn seats_available_tracks_every_change() {
        let mut reg = fleet(&[(1, 4), (2, 2)]);
        assert_eq!(reg.seats_available(), 6);

        reg.apply_seat_delta(1, -4);
        assert_eq!(reg.seats_available(), 2);
        reg.apply_seat_delta(2, -1);
        reg.apply_seat_delta(1, 3);
        assert_eq!(reg.seats_available(), 4);
        assert_eq!(reg.seats_available(), recount(&reg));

        // Unknown car leaves the total alone.
        reg.apply_seat_delta(9, 2);
        assert_eq!(reg.seats_available(), 4);

        reg.load(&[CarInfo { id: 3, seats: 5 }]);
        assert_eq!(reg.seats_available(), 5);
        assert_eq!(reg.seats_available(), recount(&reg));
    }
}
