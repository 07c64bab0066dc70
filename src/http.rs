//! HTTP adapter: decodes requests, calls the engine, maps outcomes to status codes.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::{Form, Json, State, rejection::{FormRejection, JsonRejection}},
    http::{HeaderMap, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::any,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::model::*;
use crate::observability::{self, drop_label, locate_label, ride_label};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Deserialize)]
pub struct JourneyRequest {
    pub id: GroupId,
    pub people: u8,
}

/// `ID=<group id>` form body of `/dropoff` and `/locate`.
#[derive(Debug, Deserialize)]
pub struct GroupForm {
    #[serde(rename = "ID")]
    pub id: GroupId,
}

/// Matches `^<expected>(;.*)?$`, so parameters such as `charset` are allowed.
fn has_content_type(headers: &HeaderMap, expected: &str) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    match value.strip_prefix(expected) {
        Some(rest) => rest.is_empty() || rest.starts_with(';'),
        None => false,
    }
}

fn record(operation: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        observability::REQUESTS_TOTAL,
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(observability::REQUEST_DURATION_SECONDS, "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Reject with 400 and log why.
fn bad_request(operation: &'static str, reason: &str, start: Instant) -> Response {
    warn!("{operation}: {reason}");
    record(operation, "bad_request", start);
    StatusCode::BAD_REQUEST.into_response()
}

/// Method and content-type checks shared by every write route.
fn check_request(
    operation: &'static str,
    method: &Method,
    expected_method: Method,
    headers: &HeaderMap,
    content_type: &str,
    start: Instant,
) -> Result<(), Response> {
    if *method != expected_method {
        return Err(bad_request(operation, "request format failure", start));
    }
    if !has_content_type(headers, content_type) {
        return Err(bad_request(operation, "expected headers failure", start));
    }
    Ok(())
}

async fn status(method: Method) -> StatusCode {
    if method != Method::GET {
        warn!("status: request format failure");
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::OK
}

async fn put_cars(
    State(engine): State<Arc<Engine>>,
    method: Method,
    headers: HeaderMap,
    payload: Result<Json<Vec<CarInfo>>, JsonRejection>,
) -> Response {
    const OP: &str = "load_cars";
    let start = Instant::now();
    if let Err(response) = check_request(OP, &method, Method::PUT, &headers, JSON, start) {
        return response;
    }
    let Json(fleet) = match payload {
        Ok(fleet) => fleet,
        Err(e) => return bad_request(OP, &format!("payload can't be decoded: {e}"), start),
    };
    if let Err(e) = engine.load_cars(&fleet).await {
        return bad_request(OP, &e.to_string(), start);
    }
    info!(cars = fleet.len(), "cars loaded");
    record(OP, "loaded", start);
    StatusCode::OK.into_response()
}

async fn post_journey(
    State(engine): State<Arc<Engine>>,
    method: Method,
    headers: HeaderMap,
    payload: Result<Json<JourneyRequest>, JsonRejection>,
) -> Response {
    const OP: &str = "request_ride";
    let start = Instant::now();
    if let Err(response) = check_request(OP, &method, Method::POST, &headers, JSON, start) {
        return response;
    }
    let Json(request) = match payload {
        Ok(request) => request,
        Err(e) => return bad_request(OP, &format!("payload can't be decoded: {e}"), start),
    };
    let outcome = match engine.request_ride(request.id, request.people).await {
        Ok(outcome) => outcome,
        Err(e) => return bad_request(OP, &e.to_string(), start),
    };
    record(OP, ride_label(&outcome), start);
    let status = match outcome {
        RideOutcome::Seated(car_id) => {
            info!(group_id = request.id, car_id, "group traveling");
            StatusCode::OK
        }
        RideOutcome::Enqueued => {
            info!(group_id = request.id, "group enqueued for traveling");
            StatusCode::ACCEPTED
        }
        RideOutcome::AlreadyKnown => {
            info!(group_id = request.id, "group already enqueued or traveling");
            StatusCode::ACCEPTED
        }
    };
    status.into_response()
}

async fn post_dropoff(
    State(engine): State<Arc<Engine>>,
    method: Method,
    headers: HeaderMap,
    payload: Result<Form<GroupForm>, FormRejection>,
) -> Response {
    const OP: &str = "drop_off";
    let start = Instant::now();
    if let Err(response) = check_request(OP, &method, Method::POST, &headers, FORM, start) {
        return response;
    }
    let Form(form) = match payload {
        Ok(form) => form,
        Err(e) => return bad_request(OP, &format!("payload can't be decoded: {e}"), start),
    };
    let outcome = match engine.drop_off(form.id).await {
        Ok(outcome) => outcome,
        Err(e) => return bad_request(OP, &e.to_string(), start),
    };
    record(OP, drop_label(&outcome), start);
    let status = match outcome {
        DropOutcome::DroppedTraveling { car_id, rematched } => {
            info!(group_id = form.id, car_id, rematched, "traveling group dropped off");
            StatusCode::OK
        }
        DropOutcome::DroppedWaiting => {
            info!(group_id = form.id, "waiting group dropped off");
            StatusCode::NO_CONTENT
        }
        DropOutcome::NotFound => {
            info!(group_id = form.id, "group not found");
            StatusCode::NOT_FOUND
        }
    };
    status.into_response()
}

async fn post_locate(
    State(engine): State<Arc<Engine>>,
    method: Method,
    headers: HeaderMap,
    payload: Result<Form<GroupForm>, FormRejection>,
) -> Response {
    const OP: &str = "locate";
    let start = Instant::now();
    if let Err(response) = check_request(OP, &method, Method::POST, &headers, FORM, start) {
        return response;
    }
    let Form(form) = match payload {
        Ok(form) => form,
        Err(e) => return bad_request(OP, &format!("payload can't be decoded: {e}"), start),
    };
    let location = match engine.locate(form.id).await {
        Ok(location) => location,
        Err(e) => return bad_request(OP, &e.to_string(), start),
    };
    record(OP, locate_label(&location), start);
    match location {
        Location::Traveling(car) => {
            info!(group_id = form.id, car_id = car.id, "traveling group located");
            (StatusCode::OK, Json(car)).into_response()
        }
        Location::Waiting => {
            info!(group_id = form.id, "waiting group located");
            StatusCode::NO_CONTENT.into_response()
        }
        Location::NotFound => {
            info!(group_id = form.id, "group not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Every route accepts any method; the handlers answer 400 to the wrong one.
pub fn routes(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/status", any(status))
        .route("/cars", any(put_cars))
        .route("/journey", any(post_journey))
        .route("/dropoff", any(post_dropoff))
        .route("/locate", any(post_locate))
        .with_state(engine)
}

/// Serve until `shutdown` resolves, then finish in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    engine: Arc<Engine>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, routes(engine))
        .with_graceful_shutdown(shutdown)
        .await
}
