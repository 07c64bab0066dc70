mod error;
mod ledger;
mod matching;
mod mutations;
mod queries;
mod registry;

pub use error::EngineError;
pub use ledger::GroupLedger;
pub use registry::CarRegistry;

use tokio::sync::RwLock;

use crate::model::*;

/// Car registry and group ledger, always locked together. Every operation
/// that touches both runs under one write guard, so there is no lock order
/// to get wrong.
#[derive(Debug, Default)]
pub struct Dispatch {
    pub cars: CarRegistry,
    pub groups: GroupLedger,
}

pub struct Engine {
    state: RwLock<Dispatch>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Dispatch::default()),
        }
    }
}

/// Publish fleet gauges from the current state (caller holds the lock).
fn record_gauges(dispatch: &Dispatch) {
    let traveling = dispatch.groups.traveling();
    metrics::gauge!(crate::observability::CARS).set(dispatch.cars.len() as f64);
    metrics::gauge!(crate::observability::GROUPS_TRAVELING).set(traveling as f64);
    metrics::gauge!(crate::observability::GROUPS_WAITING)
        .set((dispatch.groups.len() - traveling) as f64);
    metrics::gauge!(crate::observability::SEATS_AVAILABLE)
        .set(dispatch.cars.seats_available() as f64);
}

impl Dispatch {
    fn snapshot(&self) -> FleetSnapshot {
        let mut cars: Vec<CarState> = self.cars.cars().map(CarState::from).collect();
        cars.sort_by_key(|c| c.id);
        let traveling = self.groups.traveling();
        FleetSnapshot {
            cars,
            groups_waiting: self.groups.len() - traveling,
            groups_traveling: traveling,
            seats_available: self.cars.seats_available(),
        }
    }
}
