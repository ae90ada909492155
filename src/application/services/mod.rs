//! Application services - Use case implementations
//!
//! Each service takes its repository ports at construction and the evaluated
//! world gate per call.

pub mod atlas_service;
pub mod atlas_session;
pub mod content_service;
pub mod world_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use atlas_service::{AtlasContent, AtlasServices, AtlasSnapshot};
pub use atlas_session::AtlasSession;
pub use content_service::ContentService;
pub use world_service::{CreateWorldRequest, UpdateWorldRequest, WorldService, WorldServiceImpl};
