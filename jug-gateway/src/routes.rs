//! Axum route handlers for the riddle API.

use std::{num::NonZeroU64, sync::Arc};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use jug_core::Trace;
use serde::Deserialize;
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::GatewayConfig,
    error::GatewayError,
    service::{RiddleRequest, RiddleService},
};

const NOT_POSITIVE: &str = "every param must be a positive integer";
const NOT_INTEGER: &str = "value is not integer";

// ── Shared state ─────────────────────────────────────────────────────────────

/// Service handle shared by every request.
pub type SharedService = Arc<dyn RiddleService>;

#[derive(Clone)]
struct AppState {
    service: SharedService,
    max_capacity: u64,
}

// ── Request types ─────────────────────────────────────────────────────────────

/// Raw `x`, `y`, `z` query parameters before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RiddleQuery {
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
}

/// Validate the riddle query.
///
/// Parameters are checked in `x`, `y`, `z` order for presence and integer
/// syntax; positivity and the capacity limit are checked once all three
/// parse.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] describing the first problem found.
pub fn decode_riddle_request(
    query: &RiddleQuery,
    max_capacity: u64,
) -> Result<RiddleRequest, GatewayError> {
    let x = integer_param(query.x.as_deref())?;
    let y = integer_param(query.y.as_deref())?;
    let z = integer_param(query.z.as_deref())?;

    let (Some(x), Some(y), Some(z)) = (positive(x), positive(y), positive(z)) else {
        return Err(GatewayError::InvalidRequest(NOT_POSITIVE.to_owned()));
    };

    if x.get() > max_capacity || y.get() > max_capacity {
        return Err(GatewayError::InvalidRequest(format!(
            "jug capacity must not exceed {max_capacity}"
        )));
    }

    Ok(RiddleRequest { x, y, z })
}

fn integer_param(raw: Option<&str>) -> Result<i64, GatewayError> {
    match raw {
        None | Some("") => Err(GatewayError::InvalidRequest(NOT_POSITIVE.to_owned())),
        Some(value) => value
            .parse()
            .map_err(|_| GatewayError::InvalidRequest(NOT_INTEGER.to_owned())),
    }
}

fn positive(n: i64) -> Option<NonZeroU64> {
    u64::try_from(n).ok().and_then(NonZeroU64::new)
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router.
///
/// Serves the API under `/api/v1`, the client's assets under `/static` and
/// its `index.html` at `/`.
pub fn create_router(service: SharedService, config: &GatewayConfig) -> Router {
    let state = AppState {
        service,
        max_capacity: config.max_capacity,
    };

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/riddle", get(riddle))
        .with_state(state)
        .nest_service("/static", ServeDir::new(config.static_dir.join("static")))
        .route_service("/", ServeFile::new(config.static_dir.join("index.html")))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

/// Wrap [`create_router`] so trailing slashes are stripped before routing.
pub fn create_app(service: SharedService, config: &GatewayConfig) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(service, config))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /api/v1/health`: liveness probe.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.health())
}

/// `GET /api/v1/riddle?x=..&y=..&z=..`: solve one riddle.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] for malformed parameters,
/// [`GatewayError::Solve`] when no solution exists, and
/// [`GatewayError::Internal`] if the solver task dies.
async fn riddle(
    State(state): State<AppState>,
    query: Result<Query<RiddleQuery>, QueryRejection>,
) -> Result<Json<Trace>, GatewayError> {
    let Query(query) = query.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let request = decode_riddle_request(&query, state.max_capacity)?;

    let service = Arc::clone(&state.service);
    let trace = tokio::task::spawn_blocking(move || service.riddle(request))
        .await
        .map_err(|e| GatewayError::Internal(format!("solver task failed: {e}")))??;

    Ok(Json(trace))
}
