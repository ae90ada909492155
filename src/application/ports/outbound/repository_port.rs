//! Repository ports - Interfaces for the campaign store
//!
//! The store is an opaque collaborator reachable only through simple
//! create/read/update/delete calls keyed by collection and row id.
//! Application services depend on these traits, not concrete implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{World, WorldContent};
use crate::domain::value_objects::{UserId, WorldId};

// =============================================================================
// World Repository Port
// =============================================================================

/// Repository port for World operations
#[async_trait]
pub trait WorldRepositoryPort: Send + Sync {
    /// Create a new world
    async fn create(&self, world: &World) -> Result<()>;

    /// Get a world by ID
    async fn get(&self, id: WorldId) -> Result<Option<World>>;

    /// List the worlds a user owns, newest first
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<World>>;

    /// Update a world
    async fn update(&self, world: &World) -> Result<()>;

    /// Delete a world and all of its content (cascading)
    async fn delete(&self, id: WorldId) -> Result<()>;
}

// =============================================================================
// Content Repository Port
// =============================================================================

/// Uniform repository port for one world-scoped content collection
#[async_trait]
pub trait ContentRepositoryPort<T: WorldContent>: Send + Sync {
    /// All rows of a world regardless of visibility; the gate filters them.
    /// Rule collections also include the shared baseline rows.
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<T>>;

    /// Get a row by ID
    async fn get(&self, id: T::Id) -> Result<Option<T>>;

    /// Insert a row
    async fn create(&self, row: &T) -> Result<()>;

    /// Replace a row by ID (last write wins)
    async fn update(&self, row: &T) -> Result<()>;

    /// Delete a row by ID
    async fn delete(&self, id: T::Id) -> Result<()>;
}
