use serde::{Deserialize, Serialize};

use crate::limits::SEAT_BUCKETS;

/// Caller-assigned car identity (always positive).
pub type CarId = u64;

/// Caller-assigned group identity (always positive).
pub type GroupId = u64;

/// Logical arrival counter. Starts at 1, never reused until the next fleet load.
pub type Arrival = u64;

/// Map a seat count (1..=6) to its bucket index.
pub fn bucket(seats: u8) -> usize {
    debug_assert!(seats >= 1 && seats as usize <= SEAT_BUCKETS, "seat count out of range");
    seats as usize - 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub seats_total: u8,
    /// Invariant: `seats_available <= seats_total`.
    pub seats_available: u8,
}

impl Car {
    pub fn new(id: CarId, seats: u8) -> Self {
        Self {
            id,
            seats_total: seats,
            seats_available: seats,
        }
    }

    pub fn seats_taken(&self) -> u8 {
        self.seats_total - self.seats_available
    }

    pub fn info(&self) -> CarInfo {
        CarInfo {
            id: self.id,
            seats: self.seats_total,
        }
    }
}

/// A group as recorded in the ledger. Wait queues hold copies of this value;
/// a copy is live only while it equals the ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub people: u8,
    pub arrival: Arrival,
    /// Car the group rides in, `None` while waiting.
    pub car: Option<CarId>,
}

impl Group {
    pub fn waiting(id: GroupId, people: u8, arrival: Arrival) -> Self {
        Self {
            id,
            people,
            arrival,
            car: None,
        }
    }

    pub fn is_traveling(&self) -> bool {
        self.car.is_some()
    }
}

/// `{id, seats}`: the fleet-load entry and the locate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarInfo {
    pub id: CarId,
    pub seats: u8,
}

// ── Operation outcomes ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideOutcome {
    /// Seated right away in the given car.
    Seated(CarId),
    /// No car had room; the group waits in its size queue.
    Enqueued,
    /// The group id is already waiting or traveling. Nothing changed.
    AlreadyKnown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The group was riding; its seats went back to the car.
    DroppedTraveling {
        car_id: CarId,
        /// Waiting groups seated into the freed capacity, in seating order.
        rematched: usize,
    },
    /// The group was still waiting.
    DroppedWaiting,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Traveling(CarInfo),
    Waiting,
    NotFound,
}

impl Location {
    /// Legacy numeric form: car id, `0` for waiting, `-1` for unknown.
    pub fn code(&self) -> i64 {
        match self {
            Location::Traveling(car) => car.id as i64,
            Location::Waiting => 0,
            Location::NotFound => -1,
        }
    }
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarState {
    pub id: CarId,
    pub seats_total: u8,
    pub seats_available: u8,
}

impl From<&Car> for CarState {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id,
            seats_total: car.seats_total,
            seats_available: car.seats_available,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSnapshot {
    /// Sorted by id.
    pub cars: Vec<CarState>,
    pub groups_waiting: usize,
    pub groups_traveling: usize,
    pub seats_available: u64,
}
