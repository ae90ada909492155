//! World API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::{open_world, CurrentViewer};
use crate::application::services::{CreateWorldRequest, UpdateWorldRequest};
use crate::domain::entities::World;
use crate::domain::services::{ViewerRole, WorldAccess};
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct WorldResponse {
    #[serde(flatten)]
    pub world: World,
    pub role: ViewerRole,
    pub can_edit: bool,
}

impl From<&WorldAccess> for WorldResponse {
    fn from(access: &WorldAccess) -> Self {
        Self {
            world: access.world().clone(),
            role: access.role(),
            can_edit: access.can_mutate(),
        }
    }
}

/// List the worlds the viewer owns
pub async fn list_worlds(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
) -> Result<Json<Vec<World>>, (StatusCode, String)> {
    let worlds = state.services.worlds.list_worlds(viewer).await?;
    Ok(Json(worlds))
}

/// Create a new world owned by the viewer
pub async fn create_world(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Json(req): Json<CreateWorldRequest>,
) -> Result<(StatusCode, Json<World>), (StatusCode, String)> {
    let world = state.services.worlds.create_world(viewer, req).await?;
    Ok((StatusCode::CREATED, Json(world)))
}

/// Get a world the viewer may open
pub async fn get_world(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Result<Json<WorldResponse>, (StatusCode, String)> {
    let access = open_world(&state, &id, viewer).await?;
    Ok(Json(WorldResponse::from(&access)))
}

/// Update a world's settings
pub async fn update_world(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
    Json(req): Json<UpdateWorldRequest>,
) -> Result<Json<World>, (StatusCode, String)> {
    let access = open_world(&state, &id, viewer).await?;
    let world = state.services.worlds.update_world(&access, req).await?;
    Ok(Json(world))
}

/// Delete a world with all of its content
pub async fn delete_world(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let access = open_world(&state, &id, viewer).await?;
    state.services.worlds.delete_world(&access).await?;
    Ok(StatusCode::NO_CONTENT)
}
