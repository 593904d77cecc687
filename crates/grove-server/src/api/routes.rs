//! REST API routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::request_id;
use crate::state::{AppState, PlantOutcome};
use grove_core::{Estate, EstateStats, PlantError, PlotCoord, MAX_DIMENSION, MAX_TREE_HEIGHT};

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/estates", post(create_estate))
        .route("/v1/estates/:estate_id", get(get_estate))
        .route("/v1/estates/:estate_id/trees", post(plant_tree))
        .route("/v1/estates/:estate_id/stats", get(estate_stats))
        .route("/v1/estates/:estate_id/drone-plan", get(drone_plan))
        .layer(middleware::from_fn(request_id::ensure_request_id))
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
pub struct CreateEstateRequest {
    pub width: u32,
    pub length: u32,
}

#[derive(Debug, Deserialize)]
pub struct PlantTreeRequest {
    pub x: u32,
    pub y: u32,
    pub height: u8,
}

#[derive(Debug, Deserialize)]
pub struct DronePlanQuery {
    /// Maximum distance the drone may travel before resting.
    pub max_distance: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct DronePlanResponse {
    pub distance: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<PlotCoord>,
}

// === Handlers ===

fn bad_request(message: &str, field: Option<&str>) -> (StatusCode, Json<serde_json::Value>) {
    let mut payload = json!({ "error": message });
    if let Some(field) = field {
        payload["field"] = serde_json::Value::String(field.to_string());
    }
    (StatusCode::BAD_REQUEST, Json(payload))
}

fn validate_dimension(field: &str, value: u32) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(bad_request(
            &format!("{} must be between 1 and {}", field, MAX_DIMENSION),
            Some(field),
        ));
    }
    Ok(())
}

async fn create_estate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEstateRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    if let Err(resp) = validate_dimension("width", req.width) {
        return resp;
    }
    if let Err(resp) = validate_dimension("length", req.length) {
        return resp;
    }

    match state.create_estate(req.width, req.length).await {
        Ok(estate) => {
            tracing::info!(
                "Created estate {} ({} x {})",
                estate.id,
                estate.length,
                estate.width
            );
            (StatusCode::CREATED, Json(json!({ "id": estate.id })))
        }
        Err(err) => {
            tracing::error!("Failed to persist estate: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create estate" })),
            )
        }
    }
}

async fn get_estate(
    State(state): State<Arc<AppState>>,
    Path(estate_id): Path<String>,
) -> Result<Json<Estate>, StatusCode> {
    match state.get_estate(&estate_id).await {
        Ok(Some(estate)) => Ok(Json(estate)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(err) => {
            tracing::error!("Failed to load estate {}: {}", estate_id, err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn plant_tree(
    State(state): State<Arc<AppState>>,
    Path(estate_id): Path<String>,
    Json(req): Json<PlantTreeRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    if req.x == 0 {
        return bad_request("x must be at least 1", Some("x"));
    }
    if req.y == 0 {
        return bad_request("y must be at least 1", Some("y"));
    }
    if req.height == 0 || req.height > MAX_TREE_HEIGHT {
        return bad_request(
            &format!("height must be between 1 and {}", MAX_TREE_HEIGHT),
            Some("height"),
        );
    }

    match state.plant_tree(&estate_id, req.x, req.y, req.height).await {
        Ok(PlantOutcome::Planted { estate, tree }) => {
            tracing::info!(
                "Planted tree {} at ({}, {}) in estate {} ({} trees)",
                tree.id,
                tree.x,
                tree.y,
                estate.id,
                estate.tree_count
            );
            (StatusCode::CREATED, Json(json!({ "id": tree.id })))
        }
        Ok(PlantOutcome::EstateNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Estate not found" })),
        ),
        Ok(PlantOutcome::Rejected(err @ PlantError::OutOfBounds { .. })) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() })))
        }
        Ok(PlantOutcome::Rejected(err @ PlantError::PlotOccupied { .. })) => {
            (StatusCode::CONFLICT, Json(json!({ "error": err.to_string() })))
        }
        Err(err) => {
            tracing::error!("Failed to plant tree in estate {}: {}", estate_id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to plant tree" })),
            )
        }
    }
}

async fn estate_stats(
    State(state): State<Arc<AppState>>,
    Path(estate_id): Path<String>,
) -> Result<Json<EstateStats>, StatusCode> {
    match state.get_estate(&estate_id).await {
        Ok(Some(estate)) => Ok(Json(estate.stats())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(err) => {
            tracing::error!("Failed to load estate {}: {}", estate_id, err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn drone_plan(
    State(state): State<Arc<AppState>>,
    Path(estate_id): Path<String>,
    Query(query): Query<DronePlanQuery>,
) -> Result<Json<DronePlanResponse>, (StatusCode, Json<serde_json::Value>)> {
    if query.max_distance == Some(0) {
        return Err(bad_request("max_distance must be at least 1", Some("max_distance")));
    }

    let estate = match state.get_estate(&estate_id).await {
        Ok(Some(estate)) => estate,
        Ok(None) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Estate not found" })),
            ))
        }
        Err(err) => {
            tracing::error!("Failed to load estate {}: {}", estate_id, err);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to plan flight" })),
            ));
        }
    };

    let trees = match state.list_trees(&estate_id).await {
        Ok(trees) => trees,
        Err(err) => {
            tracing::error!("Failed to load trees for estate {}: {}", estate_id, err);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to plan flight" })),
            ));
        }
    };

    let plan = grove_core::plan_flight(&estate, &trees, query.max_distance);
    Ok(Json(DronePlanResponse {
        distance: plan.total_distance,
        rest: plan.rest,
    }))
}
