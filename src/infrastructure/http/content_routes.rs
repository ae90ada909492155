//! World-scoped content routes, shared by all five collections
//!
//! Each collection is mounted under `/api/worlds/{world_id}/<kind>` with the
//! same CRUD and visibility endpoints. Which collection a handler serves is
//! fixed by its request DTO.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{open_world, CurrentViewer};
use crate::application::dto::{ContentRequest, VisibilityRequest};
use crate::application::services::AtlasContent;
use crate::domain::entities::WorldContent;
use crate::domain::services::{apply_filter, Catalog};
use crate::infrastructure::state::AppState;

type Entity<R> = <R as ContentRequest>::Entity;
type EntityId<R> = <Entity<R> as WorldContent>::Id;
type Filter<R> = <Entity<R> as Catalog>::Filter;

/// CRUD and visibility routes for the collection `R` edits
pub fn routes<R>() -> Router<Arc<AppState>>
where
    R: ContentRequest,
    Entity<R>: AtlasContent + Catalog + Serialize,
    EntityId<R>: From<Uuid>,
    Filter<R>: DeserializeOwned + Send + 'static,
{
    let collection = format!("/api/worlds/{{world_id}}/{}", <Entity<R> as WorldContent>::KIND.as_str());
    let item = format!("{}/{{id}}", collection);
    let visibility = format!("{}/visibility", item);

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, get(fetch::<R>).put(update::<R>).delete(remove::<R>))
        .route(&visibility, put(set_visibility::<R>))
}

fn parse_row_id<R>(raw: &str) -> Result<EntityId<R>, (StatusCode, String)>
where
    R: ContentRequest,
    EntityId<R>: From<Uuid>,
{
    Uuid::parse_str(raw)
        .map(<EntityId<R> as From<Uuid>>::from)
        .map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid {} ID", <Entity<R> as WorldContent>::KIND),
            )
        })
}

/// Visible rows of a world, narrowed by the collection's filter
pub async fn list<R>(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(world_id): Path<String>,
    Query(filter): Query<Filter<R>>,
) -> Result<Json<Vec<Entity<R>>>, (StatusCode, String)>
where
    R: ContentRequest,
    Entity<R>: AtlasContent + Catalog + Serialize,
    Filter<R>: DeserializeOwned + Send,
{
    let access = open_world(&state, &world_id, viewer).await?;
    let rows = state.services.content::<Entity<R>>().list_visible(&access).await;
    Ok(Json(apply_filter(rows, &filter)))
}

pub async fn fetch<R>(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path((world_id, id)): Path<(String, String)>,
) -> Result<Json<Entity<R>>, (StatusCode, String)>
where
    R: ContentRequest,
    Entity<R>: AtlasContent + Serialize,
    EntityId<R>: From<Uuid>,
{
    let access = open_world(&state, &world_id, viewer).await?;
    let id = parse_row_id::<R>(&id)?;
    let row = state.services.content::<Entity<R>>().get_visible(&access, id).await?;
    Ok(Json(row))
}

pub async fn create<R>(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path(world_id): Path<String>,
    Json(req): Json<R>,
) -> Result<(StatusCode, Json<Entity<R>>), (StatusCode, String)>
where
    R: ContentRequest,
    Entity<R>: AtlasContent + Serialize,
{
    let access = open_world(&state, &world_id, viewer).await?;
    let row = req.into_entity(access.world_id());
    let created = state.services.content::<Entity<R>>().create(&access, row).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<R>(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path((world_id, id)): Path<(String, String)>,
    Json(req): Json<R>,
) -> Result<Json<Entity<R>>, (StatusCode, String)>
where
    R: ContentRequest,
    Entity<R>: AtlasContent + Serialize,
    EntityId<R>: From<Uuid>,
{
    let access = open_world(&state, &world_id, viewer).await?;
    let id = parse_row_id::<R>(&id)?;
    let updated = state
        .services
        .content::<Entity<R>>()
        .update_with(&access, id, move |existing| req.apply_to(existing))
        .await?;
    Ok(Json(updated))
}

pub async fn set_visibility<R>(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path((world_id, id)): Path<(String, String)>,
    Json(req): Json<VisibilityRequest>,
) -> Result<Json<Entity<R>>, (StatusCode, String)>
where
    R: ContentRequest,
    Entity<R>: AtlasContent + Serialize,
    EntityId<R>: From<Uuid>,
{
    let access = open_world(&state, &world_id, viewer).await?;
    let id = parse_row_id::<R>(&id)?;
    let updated = state
        .services
        .content::<Entity<R>>()
        .set_visibility(&access, id, req.is_public)
        .await?;
    Ok(Json(updated))
}

pub async fn remove<R>(
    State(state): State<Arc<AppState>>,
    CurrentViewer(viewer): CurrentViewer,
    Path((world_id, id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)>
where
    R: ContentRequest,
    Entity<R>: AtlasContent,
    EntityId<R>: From<Uuid>,
{
    let access = open_world(&state, &world_id, viewer).await?;
    let id = parse_row_id::<R>(&id)?;
    state.services.content::<Entity<R>>().delete(&access, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
