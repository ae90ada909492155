//! Viewer extraction from the configured identity header

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::sync::Arc;

use crate::domain::value_objects::Viewer;
use crate::infrastructure::state::AppState;

/// The viewer behind a request. Missing or malformed identities are anonymous.
#[derive(Debug, Clone, Copy)]
pub struct CurrentViewer(pub Viewer);

impl FromRequestParts<Arc<AppState>> for CurrentViewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(state.config.viewer_header.as_str())
            .and_then(|v| v.to_str().ok());

        Ok(CurrentViewer(Viewer::from_header_value(raw)))
    }
}
