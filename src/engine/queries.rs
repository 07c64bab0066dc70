use crate::model::*;

use super::mutations::validate_id;
use super::{Engine, EngineError};

impl Engine {
    /// Where a group is. Reads under a shared guard.
    pub async fn locate(&self, group_id: GroupId) -> Result<Location, EngineError> {
        validate_id(group_id)?;
        let guard = self.state.read().await;
        let Some(group) = guard.groups.get(group_id) else {
            return Ok(Location::NotFound);
        };
        Ok(match group.car {
            Some(car_id) => match guard.cars.lookup(car_id) {
                Some(car) => Location::Traveling(car.info()),
                // Unreachable while loads clear groups and cars together.
                None => Location::NotFound,
            },
            None => Location::Waiting,
        })
    }

    pub async fn car(&self, car_id: CarId) -> Option<Car> {
        self.state.read().await.cars.lookup(car_id)
    }

    pub async fn snapshot(&self) -> FleetSnapshot {
        self.state.read().await.snapshot()
    }
}
