use std::net::SocketAddr;

use crate::model::{DropOutcome, Location, RideOutcome};

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total requests handled. Labels: operation, outcome.
pub const REQUESTS_TOTAL: &str = "carpool_requests_total";

/// Histogram: request latency in seconds. Labels: operation.
pub const REQUEST_DURATION_SECONDS: &str = "carpool_request_duration_seconds";

/// Counter: waiting groups seated by a drop-off.
pub const REMATCH_SEATED_TOTAL: &str = "carpool_rematch_seated_total";

// ── USE metrics (fleet utilization) ─────────────────────────────

/// Gauge: cars in the current fleet.
pub const CARS: &str = "carpool_cars";

/// Gauge: groups waiting for a car.
pub const GROUPS_WAITING: &str = "carpool_groups_waiting";

/// Gauge: groups riding.
pub const GROUPS_TRAVELING: &str = "carpool_groups_traveling";

/// Gauge: free seats across the fleet.
pub const SEATS_AVAILABLE: &str = "carpool_seats_available";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), metrics_exporter_prometheus::BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

pub fn ride_label(outcome: &RideOutcome) -> &'static str {
    match outcome {
        RideOutcome::Seated(_) => "seated",
        RideOutcome::Enqueued => "enqueued",
        RideOutcome::AlreadyKnown => "already_known",
    }
}

pub fn drop_label(outcome: &DropOutcome) -> &'static str {
    match outcome {
        DropOutcome::DroppedTraveling { .. } => "dropped_traveling",
        DropOutcome::DroppedWaiting => "dropped_waiting",
        DropOutcome::NotFound => "not_found",
    }
}

pub fn locate_label(location: &Location) -> &'static str {
    match location {
        Location::Traveling(_) => "traveling",
        Location::Waiting => "waiting",
        Location::NotFound => "not_found",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CarInfo;

    #[test]
    fn init_without_port_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn labels_are_snake_case() {
        let labels = [
            ride_label(&RideOutcome::Seated(1)),
            ride_label(&RideOutcome::AlreadyKnown),
            drop_label(&DropOutcome::DroppedTraveling { car_id: 1, rematched: 0 }),
            locate_label(&Location::Traveling(CarInfo { id: 1, seats: 4 })),
            locate_label(&Location::NotFound),
        ];
        for label in labels {
            assert!(label.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{label}");
        }
    }
}
