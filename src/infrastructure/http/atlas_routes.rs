//! Atlas snapshot route

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::CurrentViewer;
use crate::application::services::AtlasSnapshot;
use crate::domain::value_objects::WorldId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AtlasQuery {
    pub world: Option<String>,
}

/// Everything the viewer sees of the selected world.
///
/// An unknown, malformed or private `world` yields the unselected snapshot.
pub async fn get_atlas(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Query(query): Query<AtlasQuery>,
) -> Json<AtlasSnapshot> {
    let selected = query
        .world
        .as_deref()
        .and_then(|raw| WorldId::parse(raw.trim()).ok());

    Json(state.services.snapshot(selected, viewer).await)
}
