/// Smallest car / group size.
pub const MIN_SEATS: u8 = 1;

/// Largest car / group size. Also the number of pool buckets and wait queues.
pub const MAX_SEATS: u8 = 6;

/// Number of capacity buckets (bucket `k` holds seat count `k + 1`).
pub const SEAT_BUCKETS: usize = MAX_SEATS as usize;

/// Largest fleet accepted by a single load.
pub const MAX_CARS: usize = 100_000;

/// Largest car / group id. Ids travel as signed 64-bit integers in the locate answer.
pub const MAX_ID: u64 = i64::MAX as u64;
