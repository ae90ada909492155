//! Rule routes beyond plain CRUD

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{open_world, CurrentViewer};
use crate::domain::services::rule_categories;
use crate::infrastructure::state::AppState;

/// Distinct categories of the visible rules, baseline included
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(world_id): Path<String>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let access = open_world(&state, &world_id, viewer).await?;
    let rules = state.services.rules.list_visible(&access).await;
    Ok(Json(rule_categories(&rules)))
}
