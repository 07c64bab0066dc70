use crate::model::CarId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidId(u64),
    InvalidSeats { car_id: CarId, seats: u8 },
    InvalidPeople(u8),
    DuplicateCar(CarId),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidId(id) => write!(f, "invalid id: {id}"),
            EngineError::InvalidSeats { car_id, seats } => {
                write!(f, "car {car_id}: seats must be 1..=6, got {seats}")
            }
            EngineError::InvalidPeople(people) => {
                write!(f, "people must be 1..=6, got {people}")
            }
            EngineError::DuplicateCar(id) => write!(f, "car {id} listed more than once"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
