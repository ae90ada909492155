//! Lore timeline routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{open_world, CurrentViewer};
use crate::domain::services::{era_timeline, EraSummary};
use crate::infrastructure::state::AppState;

/// Eras of the visible lore, in chronological order
pub async fn list_eras(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(world_id): Path<String>,
) -> Result<Json<Vec<EraSummary>>, (StatusCode, String)> {
    let access = open_world(&state, &world_id, viewer).await?;
    let lore = state.services.lore.list_visible(&access).await;
    Ok(Json(era_timeline(&lore)))
}
