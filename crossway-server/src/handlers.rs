//! HTTP handlers over a shared read-only road graph
//!
//! The graph is built once before the listener starts; every handler
//! borrows it immutably through the shared state, so requests run
//! concurrently without locking.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crossway_core::{
    Error, ResolvedStreet, RoadGraph, find_intersections, plan_route, resolve,
};

#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<RoadGraph>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/resolve", get(resolve_street))
        .route("/intersections", get(intersections))
        .route("/route", post(route))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    nodes: usize,
    edges: usize,
    skipped_records: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        nodes: state.graph.node_count(),
        edges: state.graph.edge_count(),
        skipped_records: state.graph.skipped_records(),
    })
}

#[derive(Debug, Deserialize)]
struct ResolveParams {
    query: String,
}

async fn resolve_street(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<ResolvedStreet>, ApiError> {
    let resolved = resolve(&state.graph, &params.query)?;
    info!(query = %params.query, name = %resolved.name, "resolved street");
    Ok(Json(resolved))
}

#[derive(Debug, Deserialize)]
struct IntersectionParams {
    street_a: String,
    street_b: String,
}

#[derive(Debug, Serialize)]
struct IntersectionsResponse {
    /// Crossing coordinates as [x, y]; empty when the streets never meet
    crossings: Vec<[f64; 2]>,
}

async fn intersections(
    State(state): State<AppState>,
    Query(params): Query<IntersectionParams>,
) -> Result<Json<IntersectionsResponse>, ApiError> {
    let crossings = find_intersections(&state.graph, &params.street_a, &params.street_b)?
        .into_iter()
        .map(|point| [point.x(), point.y()])
        .collect();
    Ok(Json(IntersectionsResponse { crossings }))
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    /// Street pair naming the start intersection
    from: [String; 2],
    /// Street pair naming the destination intersection
    to: [String; 2],
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    total_length: f64,
    hops: usize,
    streets: Vec<String>,
    geojson: geojson::FeatureCollection,
}

async fn route(
    State(state): State<AppState>,
    Json(body): Json<RouteBody>,
) -> Result<Json<RouteResponse>, ApiError> {
    let plan = plan_route(
        &state.graph,
        (&body.from[0], &body.from[1]),
        (&body.to[0], &body.to[1]),
    )?;

    info!(
        from = ?plan.from.streets,
        to = ?plan.to.streets,
        length = plan.path.total_length,
        "route computed"
    );

    Ok(Json(RouteResponse {
        total_length: plan.path.total_length,
        hops: plan.path.hop_count(),
        streets: plan.path.street_names(),
        geojson: plan.to_geojson(),
    }))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::StreetNotFound { .. } | Error::UnknownCoordinate { .. } => {
                StatusCode::NOT_FOUND
            }
            Error::NoIntersection { .. } | Error::NoPath { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::InvalidData(_) | Error::GeoJson(_) => StatusCode::BAD_REQUEST,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let suggestions = match self.0 {
            Error::StreetNotFound { ref suggestions, .. } => suggestions.clone(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: self.0.to_string(),
            suggestions,
        };
        (status, Json(body)).into_response()
    }
}
