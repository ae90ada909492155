//! Map marker routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{open_world, CurrentViewer};
use crate::application::dto::{MoveMarkerRequest, PlaceMarkerRequest};
use crate::domain::entities::Location;
use crate::domain::value_objects::{LocationId, MapPosition};
use crate::infrastructure::state::AppState;

/// Drop a new marker where the owner clicked
pub async fn place_marker(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(world_id): Path<String>,
    Json(req): Json<PlaceMarkerRequest>,
) -> Result<(StatusCode, Json<Location>), (StatusCode, String)> {
    let access = open_world(&state, &world_id, viewer).await?;
    let location = state
        .services
        .locations
        .place_marker(&access, req.name, MapPosition::new(req.x, req.y), req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Persist a dragged marker's position
pub async fn move_marker(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path((world_id, id)): Path<(String, String)>,
    Json(req): Json<MoveMarkerRequest>,
) -> Result<Json<Location>, (StatusCode, String)> {
    let access = open_world(&state, &world_id, viewer).await?;
    let id = LocationId::parse(&id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid location ID".to_string()))?;
    let location = state
        .services
        .locations
        .move_marker(&access, id, req.position())
        .await?;
    Ok(Json(location))
}
