//! SRD bestiary lookup route

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::ports::outbound::{BestiaryPage, BestiaryQuery};
use crate::infrastructure::state::AppState;

/// Search published monsters. Lookup failures yield an empty page.
pub async fn search_bestiary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BestiaryQuery>,
) -> Json<BestiaryPage> {
    match state.bestiary.search(&query).await {
        Ok(page) => Json(page),
        Err(e) => {
            tracing::warn!("SRD bestiary lookup failed: {}", e);
            Json(BestiaryPage {
                page: query.page(),
                ..BestiaryPage::default()
            })
        }
    }
}
