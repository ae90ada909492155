//! World Service - Application service for world management
//!
//! Creating a world makes the authenticated viewer its owner for life.
//! Opening a world evaluates the visibility gate for the viewer; any failure
//! to open degrades to "no world selected" instead of an error.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::application::errors::AtlasError;
use crate::application::ports::outbound::WorldRepositoryPort;
use crate::domain::entities::World;
use crate::domain::services::WorldAccess;
use crate::domain::value_objects::{Viewer, WorldId};

/// Request to create a new world
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorldRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Request to update an existing world
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorldRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub map_url: Option<String>,
    pub is_public: Option<bool>,
}

/// World service trait defining the application use cases
#[async_trait]
pub trait WorldService: Send + Sync {
    /// Create a new world owned by the viewer
    async fn create_world(&self, viewer: Viewer, request: CreateWorldRequest) -> Result<World, AtlasError>;

    /// List the worlds the viewer owns, newest first
    async fn list_worlds(&self, viewer: Viewer) -> Result<Vec<World>, AtlasError>;

    /// Evaluate the viewer's access to a world.
    ///
    /// `None` covers unknown ids, private worlds of other users and store
    /// failures alike.
    async fn open_world(&self, id: WorldId, viewer: Viewer) -> Option<WorldAccess>;

    /// Update a world's settings
    async fn update_world(&self, access: &WorldAccess, request: UpdateWorldRequest) -> Result<World, AtlasError>;

    /// Delete a world with all of its content
    async fn delete_world(&self, access: &WorldAccess) -> Result<(), AtlasError>;
}

/// Default implementation of WorldService over a world repository
#[derive(Clone)]
pub struct WorldServiceImpl {
    repository: Arc<dyn WorldRepositoryPort>,
}

impl WorldServiceImpl {
    pub fn new(repository: Arc<dyn WorldRepositoryPort>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl WorldService for WorldServiceImpl {
    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_world(&self, viewer: Viewer, request: CreateWorldRequest) -> Result<World, AtlasError> {
        let owner_id = viewer.user_id().ok_or(AtlasError::Unauthenticated)?;

        let mut world = World::new(owner_id, request.name.trim())
            .with_description(request.description)
            .public(request.is_public);
        if let Some(map_url) = request.map_url {
            world = world.with_map_url(map_url);
        }
        world.validate().map_err(AtlasError::Validation)?;

        self.repository
            .create(&world)
            .await
            .context("Failed to create world in repository")?;

        info!(world_id = %world.id, owner_id = %owner_id, "Created new world: {}", world.name);
        Ok(world)
    }

    #[instrument(skip(self))]
    async fn list_worlds(&self, viewer: Viewer) -> Result<Vec<World>, AtlasError> {
        let owner_id = viewer.user_id().ok_or(AtlasError::Unauthenticated)?;
        debug!(owner_id = %owner_id, "Listing owned worlds");
        let worlds = self
            .repository
            .list_by_owner(owner_id)
            .await
            .context("Failed to list worlds from repository")?;
        Ok(worlds)
    }

    #[instrument(skip(self))]
    async fn open_world(&self, id: WorldId, viewer: Viewer) -> Option<WorldAccess> {
        let world = match self.repository.get(id).await {
            Ok(Some(world)) => world,
            Ok(None) => {
                debug!(world_id = %id, "World not found");
                return None;
            }
            Err(e) => {
                warn!(world_id = %id, error = %e, "World lookup failed; nothing selected");
                return None;
            }
        };

        let access = WorldAccess::evaluate(world, viewer);
        if access.is_none() {
            debug!(world_id = %id, viewer = %viewer, "World is private to its owner");
        }
        access
    }

    #[instrument(skip(self, access, request), fields(world_id = %access.world_id()))]
    async fn update_world(&self, access: &WorldAccess, request: UpdateWorldRequest) -> Result<World, AtlasError> {
        access.authorize_mutation()?;

        let mut world = access.world().clone();
        if let Some(name) = request.name {
            world.name = name.trim().to_string();
        }
        if let Some(description) = request.description {
            world.description = description;
        }
        if let Some(map_url) = request.map_url {
            world = world.with_map_url(map_url);
        }
        if let Some(is_public) = request.is_public {
            world.is_public = is_public;
        }
        world.validate().map_err(AtlasError::Validation)?;

        self.repository
            .update(&world)
            .await
            .context("Failed to update world in repository")?;

        info!("Updated world: {}", world.name);
        Ok(world)
    }

    #[instrument(skip(self, access), fields(world_id = %access.world_id()))]
    async fn delete_world(&self, access: &WorldAccess) -> Result<(), AtlasError> {
        access.authorize_mutation()?;

        // The repository handles cascading deletion
        self.repository
            .delete(access.world_id())
            .await
            .context("Failed to delete world from repository")?;

        info!("Deleted world: {}", access.world().name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::TestWorldStore;
    use crate::domain::services::ViewerRole;
    use crate::domain::value_objects::UserId;

    fn service() -> (Arc<TestWorldStore>, WorldServiceImpl) {
        let store = Arc::new(TestWorldStore::default());
        let service = WorldServiceImpl::new(store.clone() as Arc<dyn WorldRepositoryPort>);
        (store, service)
    }

    fn create_request(name: &str, is_public: bool) -> CreateWorldRequest {
        CreateWorldRequest {
            name: name.to_string(),
            description: "A test world".to_string(),
            map_url: None,
            is_public,
        }
    }

    #[tokio::test]
    async fn test_create_world_requires_authentication() {
        let (_, service) = service();
        let result = service
            .create_world(Viewer::Anonymous, create_request("Faerun", true))
            .await;
        assert!(matches!(result, Err(AtlasError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_create_world_validation() {
        let (_, service) = service();
        let viewer = Viewer::Authenticated(UserId::new());

        let empty = service.create_world(viewer, create_request("   ", false)).await;
        assert!(matches!(empty, Err(AtlasError::Validation(_))));

        let too_long = service
            .create_world(viewer, create_request(&"x".repeat(256), false))
            .await;
        assert!(matches!(too_long, Err(AtlasError::Validation(_))));
    }

    #[tokio::test]
    async fn test_creator_owns_world() {
        let (_, service) = service();
        let owner = UserId::new();
        let world = service
            .create_world(Viewer::Authenticated(owner), create_request("Faerun", false))
            .await
            .unwrap();
        assert_eq!(world.owner_id, owner);

        let access = service
            .open_world(world.id, Viewer::Authenticated(owner))
            .await
            .unwrap();
        assert_eq!(access.role(), ViewerRole::Owner);

        let worlds = service.list_worlds(Viewer::Authenticated(owner)).await.unwrap();
        assert_eq!(worlds.len(), 1);
        assert!(service
            .list_worlds(Viewer::Authenticated(UserId::new()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_open_world_falls_back_to_unselected() {
        let (store, service) = service();
        let owner = UserId::new();
        let private = World::new(owner, "Hidden");
        let public = World::new(owner, "Shared").public(true);
        store.seed(private.clone());
        store.seed(public.clone());

        assert!(service.open_world(WorldId::new(), Viewer::Anonymous).await.is_none());
        assert!(service.open_world(private.id, Viewer::Anonymous).await.is_none());
        assert_eq!(
            service
                .open_world(public.id, Viewer::Authenticated(UserId::new()))
                .await
                .map(|a| a.role()),
            Some(ViewerRole::Guest)
        );

        store.fail(true);
        assert!(service
            .open_world(public.id, Viewer::Authenticated(owner))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_only_owner_updates_and_deletes() {
        let (store, service) = service();
        let owner = UserId::new();
        let world = World::new(owner, "Shared").public(true);
        store.seed(world.clone());

        let guest = service.open_world(world.id, Viewer::Anonymous).await.unwrap();
        let rename = UpdateWorldRequest {
            name: Some("Stolen".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_world(&guest, rename.clone()).await,
            Err(AtlasError::Forbidden(_))
        ));
        assert!(service.delete_world(&guest).await.is_err());

        let owner_access = service
            .open_world(world.id, Viewer::Authenticated(owner))
            .await
            .unwrap();
        let updated = service.update_world(&owner_access, rename).await.unwrap();
        assert_eq!(updated.name, "Stolen");

        service.delete_world(&owner_access).await.unwrap();
        assert!(service
            .open_world(world.id, Viewer::Authenticated(owner))
            .await
            .is_none());
    }
}
