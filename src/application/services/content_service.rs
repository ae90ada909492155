//! Content Service - world-scoped CRUD behind the visibility gate
//!
//! One instance per content collection. Every call takes the evaluated
//! [`WorldAccess`] for the current request; reads are filtered through it and
//! writes are rejected before touching the store unless the viewer owns the
//! world.

use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info, instrument, warn};

use crate::application::errors::AtlasError;
use crate::application::ports::outbound::ContentRepositoryPort;
use crate::domain::entities::{Location, WorldContent};
use crate::domain::services::WorldAccess;
use crate::domain::value_objects::{LocationId, MapPosition};

pub struct ContentService<T: WorldContent> {
    repository: Arc<dyn ContentRepositoryPort<T>>,
}

impl<T: WorldContent> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T: WorldContent> ContentService<T> {
    pub fn new(repository: Arc<dyn ContentRepositoryPort<T>>) -> Self {
        Self { repository }
    }

    /// Rows of the world visible to this viewer. Store failures degrade to an
    /// empty collection.
    #[instrument(skip(self, access), fields(kind = %T::KIND, world_id = %access.world_id()))]
    pub async fn list_visible(&self, access: &WorldAccess) -> Vec<T> {
        match self.repository.list_by_world(access.world_id()).await {
            Ok(rows) => {
                let visible = access.visible(rows);
                debug!(count = visible.len(), role = ?access.role(), "Listed visible rows");
                visible
            }
            Err(e) => {
                warn!(error = %e, "Failed to load {}; showing none", T::KIND);
                Vec::new()
            }
        }
    }

    /// A single row, or `NotFound` if it is absent or not visible to the viewer
    #[instrument(skip(self, access), fields(kind = %T::KIND, world_id = %access.world_id()))]
    pub async fn get_visible(&self, access: &WorldAccess, id: T::Id) -> Result<T, AtlasError> {
        let row = self
            .repository
            .get(id)
            .await
            .with_context(|| format!("Failed to get {} {}", T::KIND, id))?;

        match row {
            Some(row) if access.can_see(&row) => Ok(row),
            _ => Err(AtlasError::not_found(format!("{} {}", T::KIND, id))),
        }
    }

    #[instrument(skip(self, access, row), fields(kind = %T::KIND, world_id = %access.world_id()))]
    pub async fn create(&self, access: &WorldAccess, mut row: T) -> Result<T, AtlasError> {
        self.authorize(access)?;

        row.bind(T::Id::default(), access.world_id());
        row.validate().map_err(AtlasError::Validation)?;

        self.repository
            .create(&row)
            .await
            .with_context(|| format!("Failed to create {}", T::KIND))?;

        info!(row_id = %row.id(), "Created {} row", T::KIND);
        Ok(row)
    }

    /// Load a row of this world, apply `edit`, validate and store it
    #[instrument(skip(self, access, edit), fields(kind = %T::KIND, world_id = %access.world_id()))]
    pub async fn update_with<F>(&self, access: &WorldAccess, id: T::Id, edit: F) -> Result<T, AtlasError>
    where
        F: FnOnce(T) -> T + Send,
    {
        let existing = self.load_mutable(access, id).await?;

        let mut updated = edit(existing);
        updated.bind(id, access.world_id());
        updated.validate().map_err(AtlasError::Validation)?;

        self.repository
            .update(&updated)
            .await
            .with_context(|| format!("Failed to update {} {}", T::KIND, id))?;

        info!(row_id = %id, "Updated {} row", T::KIND);
        Ok(updated)
    }

    pub async fn set_visibility(
        &self,
        access: &WorldAccess,
        id: T::Id,
        is_public: bool,
    ) -> Result<T, AtlasError> {
        self.update_with(access, id, |mut row| {
            row.set_public(is_public);
            row
        })
        .await
    }

    #[instrument(skip(self, access), fields(kind = %T::KIND, world_id = %access.world_id()))]
    pub async fn delete(&self, access: &WorldAccess, id: T::Id) -> Result<(), AtlasError> {
        self.load_mutable(access, id).await?;

        self.repository
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete {} {}", T::KIND, id))?;

        info!(row_id = %id, "Deleted {} row", T::KIND);
        Ok(())
    }

    fn authorize(&self, access: &WorldAccess) -> Result<(), AtlasError> {
        access.authorize_mutation().map_err(|denied| {
            warn!(viewer = %access.viewer(), "Rejected {} mutation: {}", T::KIND, denied);
            AtlasError::from(denied)
        })
    }

    async fn load_mutable(&self, access: &WorldAccess, id: T::Id) -> Result<T, AtlasError> {
        self.authorize(access)?;

        let existing = self
            .repository
            .get(id)
            .await
            .with_context(|| format!("Failed to get {} {}", T::KIND, id))?
            .ok_or_else(|| AtlasError::not_found(format!("{} {}", T::KIND, id)))?;

        // Rows of other worlds are reported as missing rather than forbidden
        match existing.world_id() {
            Some(world_id) if world_id != access.world_id() => {
                Err(AtlasError::not_found(format!("{} {}", T::KIND, id)))
            }
            _ => {
                access.authorize_row_mutation(&existing)?;
                Ok(existing)
            }
        }
    }
}

impl ContentService<Location> {
    /// Drop a new pin where the owner clicked on the map
    pub async fn place_marker(
        &self,
        access: &WorldAccess,
        name: impl Into<String>,
        position: MapPosition,
        description: impl Into<String>,
    ) -> Result<Location, AtlasError> {
        let location = Location::new(access.world_id(), name, position).with_description(description);
        self.create(access, location).await
    }

    /// Persist a dragged marker's new position
    pub async fn move_marker(
        &self,
        access: &WorldAccess,
        id: LocationId,
        position: MapPosition,
    ) -> Result<Location, AtlasError> {
        if !position.is_on_map() {
            return Err(AtlasError::Validation(format!(
                "Position ({}, {}) is outside the map",
                position.x, position.y
            )));
        }
        self.update_with(access, id, |mut location| {
            location.position = position;
            location
        })
        .await
    }
}
