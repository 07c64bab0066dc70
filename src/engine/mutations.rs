use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::limits::*;
use crate::model::*;

use super::{record_gauges, Engine, EngineError};

pub(crate) fn validate_people(people: u8) -> Result<(), EngineError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&people) {
        return Err(EngineError::InvalidPeople(people));
    }
    Ok(())
}

pub(crate) fn validate_id(id: u64) -> Result<(), EngineError> {
    if id == 0 || id > MAX_ID {
        return Err(EngineError::InvalidId(id));
    }
    Ok(())
}

pub(crate) fn validate_fleet(fleet: &[CarInfo]) -> Result<(), EngineError> {
    if fleet.len() > MAX_CARS {
        return Err(EngineError::LimitExceeded("too many cars"));
    }
    let mut seen = HashSet::with_capacity(fleet.len());
    for car in fleet {
        validate_id(car.id)?;
        if !(MIN_SEATS..=MAX_SEATS).contains(&car.seats) {
            return Err(EngineError::InvalidSeats {
                car_id: car.id,
                seats: car.seats,
            });
        }
        if !seen.insert(car.id) {
            return Err(EngineError::DuplicateCar(car.id));
        }
    }
    Ok(())
}

impl Engine {
    /// Replace the fleet and forget every group. Nothing changes if the fleet is rejected.
    pub async fn load_cars(&self, fleet: &[CarInfo]) -> Result<(), EngineError> {
        validate_fleet(fleet)?;
        let mut guard = self.state.write().await;
        guard.groups.clear();
        guard.cars.load(fleet);
        record_gauges(&guard);
        info!(cars = fleet.len(), "fleet loaded");
        Ok(())
    }

    /// Seat a new group in any car with room, or queue it.
    pub async fn request_ride(
        &self,
        group_id: GroupId,
        people: u8,
    ) -> Result<RideOutcome, EngineError> {
        validate_id(group_id)?;
        validate_people(people)?;

        let mut guard = self.state.write().await;
        if guard.groups.contains(group_id) {
            debug!(group_id, "ride requested for known group");
            return Ok(RideOutcome::AlreadyKnown);
        }

        let group = guard.groups.admit(group_id, people);
        let seated = match guard.cars.find_any_with_capacity(people) {
            Some(car) => {
                let seated = guard.seat(car, group);
                if seated.is_none() {
                    warn!(group_id, car_id = car.id, "pooled car could not seat group");
                }
                seated
            }
            None => None,
        };
        let outcome = match seated {
            Some(car) => {
                debug!(
                    group_id,
                    car_id = car.id,
                    people,
                    arrival = group.arrival,
                    "group seated"
                );
                RideOutcome::Seated(car.id)
            }
            None => {
                guard.groups.enqueue(group);
                debug!(group_id, people, arrival = group.arrival, "group enqueued");
                RideOutcome::Enqueued
            }
        };
        record_gauges(&guard);
        Ok(outcome)
    }

    /// Remove a group whether riding or waiting. A riding group's seats are
    /// handed to waiting groups before the lock is released.
    pub async fn drop_off(&self, group_id: GroupId) -> Result<DropOutcome, EngineError> {
        validate_id(group_id)?;

        let mut guard = self.state.write().await;
        let Some(group) = guard.groups.remove(group_id) else {
            return Ok(DropOutcome::NotFound);
        };

        let outcome = match group.car {
            Some(car_id) => {
                guard.cars.apply_seat_delta(car_id, group.people as i8);
                let rematched = guard.rematch(car_id);
                if rematched > 0 {
                    metrics::counter!(crate::observability::REMATCH_SEATED_TOTAL)
                        .increment(rematched as u64);
                }
                debug!(
                    group_id,
                    car_id,
                    people = group.people,
                    rematched,
                    "traveling group dropped"
                );
                DropOutcome::DroppedTraveling { car_id, rematched }
            }
            // Its queue entry is now stale and goes on the next scan.
            None => {
                debug!(group_id, "waiting group dropped");
                DropOutcome::DroppedWaiting
            }
        };
        record_gauges(&guard);
        Ok(outcome)
    }
}
