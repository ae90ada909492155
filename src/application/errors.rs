//! Error taxonomy for application services

use crate::domain::services::AccessDenied;

/// Errors returned by application services.
///
/// Read paths mostly never produce these: failed collection reads degrade to
/// empty collections and failed world lookups degrade to "no world selected".
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Sign in to manage worlds")]
    Unauthenticated,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AtlasError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        AtlasError::NotFound(what.to_string())
    }
}
