//! HTTP REST API routes

mod atlas_routes;
mod bestiary_routes;
mod content_routes;
mod location_routes;
mod lore_routes;
mod rule_routes;
mod viewer;
mod world_routes;

use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::application::dto::{LocationRequest, LoreRequest, MonsterRequest, NoteRequest, RuleRequest};
use crate::application::errors::AtlasError;
use crate::domain::services::WorldAccess;
use crate::domain::value_objects::{Viewer, WorldId};
use crate::infrastructure::state::AppState;

pub use viewer::CurrentViewer;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Atlas snapshot
        .route("/api/atlas", get(atlas_routes::get_atlas))
        // World routes
        .route(
            "/api/worlds",
            get(world_routes::list_worlds).post(world_routes::create_world),
        )
        .route(
            "/api/worlds/{world_id}",
            get(world_routes::get_world)
                .put(world_routes::update_world)
                .delete(world_routes::delete_world),
        )
        // Collection extras
        .route(
            "/api/worlds/{world_id}/lore/eras",
            get(lore_routes::list_eras),
        )
        .route(
            "/api/worlds/{world_id}/rules/categories",
            get(rule_routes::list_categories),
        )
        .route(
            "/api/worlds/{world_id}/locations/markers",
            post(location_routes::place_marker),
        )
        .route(
            "/api/worlds/{world_id}/locations/{id}/position",
            put(location_routes::move_marker),
        )
        // World-scoped content collections
        .merge(content_routes::routes::<LocationRequest>())
        .merge(content_routes::routes::<LoreRequest>())
        .merge(content_routes::routes::<RuleRequest>())
        .merge(content_routes::routes::<MonsterRequest>())
        .merge(content_routes::routes::<NoteRequest>())
        // SRD bestiary
        .route("/api/bestiary", get(bestiary_routes::search_bestiary))
}

/// The full application: health check, API routes and HTTP layers
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Merge REST API routes
        .merge(create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

impl From<AtlasError> for (StatusCode, String) {
    fn from(error: AtlasError) -> Self {
        let status = match &error {
            AtlasError::NotFound(_) => StatusCode::NOT_FOUND,
            AtlasError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AtlasError::Forbidden(_) => StatusCode::FORBIDDEN,
            AtlasError::Validation(_) => StatusCode::BAD_REQUEST,
            AtlasError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, error.to_string())
    }
}

fn parse_world_id(raw: &str) -> Result<WorldId, (StatusCode, String)> {
    WorldId::parse(raw).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid world ID".to_string()))
}

/// Evaluate the viewer's gate for a world named in the path.
/// Worlds the viewer may not open are reported as missing.
async fn open_world(
    state: &AppState,
    raw_world_id: &str,
    viewer: Viewer,
) -> Result<WorldAccess, (StatusCode, String)> {
    let world_id = parse_world_id(raw_world_id)?;
    state
        .services
        .worlds
        .open_world(world_id, viewer)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, "World not found".to_string()))
}
