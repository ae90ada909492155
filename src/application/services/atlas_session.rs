//! Atlas session - the state one browser tab holds
//!
//! Keeps the viewer, the selected world and its visible collections. The gate
//! is re-evaluated on every world selection and every viewer change; nothing
//! from a previous (world, viewer) pair survives a transition.

use tracing::{debug, warn};

use super::atlas_service::{AtlasServices, AtlasSnapshot};
use crate::application::errors::AtlasError;
use crate::domain::services::WorldAccess;
use crate::domain::value_objects::{LocationId, MapPosition, Viewer, WorldId};

pub struct AtlasSession {
    services: AtlasServices,
    viewer: Viewer,
    selected: Option<WorldId>,
    access: Option<WorldAccess>,
    snapshot: AtlasSnapshot,
}

impl AtlasSession {
    /// Open a session, `selected` usually coming from the shared-link query parameter
    pub async fn open(services: AtlasServices, viewer: Viewer, selected: Option<WorldId>) -> Self {
        let mut session = Self {
            services,
            viewer,
            selected,
            access: None,
            snapshot: AtlasSnapshot::default(),
        };
        session.reload().await;
        session
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn access(&self) -> Option<&WorldAccess> {
        self.access.as_ref()
    }

    pub fn snapshot(&self) -> &AtlasSnapshot {
        &self.snapshot
    }

    /// Switch to another world, or to none
    pub async fn select_world(&mut self, selected: Option<WorldId>) {
        self.selected = selected;
        self.reload().await;
    }

    /// Sign-in or sign-out happened
    pub async fn change_viewer(&mut self, viewer: Viewer) {
        self.viewer = viewer;
        self.reload().await;
    }

    /// Re-evaluate the gate and refetch every collection
    pub async fn reload(&mut self) {
        self.access = self.services.open(self.selected, self.viewer).await;
        if self.selected.is_some() && self.access.is_none() {
            debug!("Selected world could not be opened; returning to world selection");
            self.selected = None;
        }
        self.snapshot = self
            .services
            .snapshot_for(self.access.as_ref(), self.viewer)
            .await;
    }

    /// Move a marker after a drag.
    ///
    /// The local position changes immediately. If persisting fails the
    /// location collection is refetched from the store and the error returned.
    pub async fn drag_marker(&mut self, id: LocationId, position: MapPosition) -> Result<(), AtlasError> {
        let access = self
            .access
            .clone()
            .ok_or_else(|| AtlasError::not_found("selected world"))?;
        access.authorize_mutation()?;

        if let Some(location) = self.snapshot.locations.iter_mut().find(|l| l.id == id) {
            location.position = position;
        }

        match self.services.locations.move_marker(&access, id, position).await {
            Ok(saved) => {
                if let Some(location) = self.snapshot.locations.iter_mut().find(|l| l.id == id) {
                    *location = saved;
                }
                Ok(())
            }
            Err(e) => {
                warn!(location_id = %id, error = %e, "Marker move failed; reloading locations");
                self.snapshot.locations = self.services.locations.list_visible(&access).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::atlas_service::tests::{seed_world, services};
    use crate::domain::services::ViewerRole;
    use crate::domain::value_objects::UserId;

    #[tokio::test]
    async fn test_gate_is_reevaluated_on_viewer_change() {
        let (stores, services) = services();
        let owner = UserId::new();
        let world = seed_world(&stores, owner);

        let mut session = AtlasSession::open(services, Viewer::Anonymous, Some(world.id)).await;
        assert_eq!(session.snapshot().role, Some(ViewerRole::Guest));
        assert_eq!(session.snapshot().lore.len(), 1);

        session.change_viewer(Viewer::Authenticated(owner)).await;
        assert_eq!(session.snapshot().role, Some(ViewerRole::Owner));
        assert_eq!(session.snapshot().lore.len(), 2);

        session.change_viewer(Viewer::Anonymous).await;
        assert!(!session.snapshot().can_edit);
        assert_eq!(session.snapshot().lore.len(), 1);
    }

    #[tokio::test]
    async fn test_private_world_selection_falls_back() {
        let (stores, services) = services();
        let owner = UserId::new();
        let world = seed_world(&stores, owner);
        let private = crate::domain::entities::World::new(owner, "Secret Plane");
        stores.worlds.seed(private.clone());

        let mut session = AtlasSession::open(services, Viewer::Anonymous, Some(world.id)).await;
        assert!(session.access().is_some());

        session.select_world(Some(private.id)).await;
        assert!(session.access().is_none());
        assert!(session.snapshot().world.is_none());
        assert!(session.snapshot().locations.is_empty());
    }

    #[tokio::test]
    async fn test_drag_marker_persists() {
        let (stores, services) = services();
        let owner = UserId::new();
        let world = seed_world(&stores, owner);
        let mut session =
            AtlasSession::open(services, Viewer::Authenticated(owner), Some(world.id)).await;
        let id = session.snapshot().locations[0].id;

        session
            .drag_marker(id, MapPosition::new(10.0, 20.0))
            .await
            .unwrap();
        assert_eq!(stores.locations.row(id).unwrap().position, MapPosition::new(10.0, 20.0));
        let local = session.snapshot().locations.iter().find(|l| l.id == id).unwrap();
        assert_eq!(local.position, MapPosition::new(10.0, 20.0));
    }

    #[tokio::test]
    async fn test_failed_drag_reconciles_with_store() {
        let (stores, services) = services();
        let owner = UserId::new();
        let world = seed_world(&stores, owner);
        let mut session =
            AtlasSession::open(services, Viewer::Authenticated(owner), Some(world.id)).await;
        let id = session.snapshot().locations[0].id;
        let original = stores.locations.row(id).unwrap().position;
        stores.locations.fail_writes(true);

        let result = session.drag_marker(id, MapPosition::new(10.0, 20.0)).await;
        assert!(matches!(result, Err(AtlasError::Store(_))));
        let local = session.snapshot().locations.iter().find(|l| l.id == id).unwrap();
        assert_eq!(local.position, original);
    }

    #[tokio::test]
    async fn test_guest_drag_is_rejected_without_local_change() {
        let (stores, services) = services();
        let world = seed_world(&stores, UserId::new());
        let mut session = AtlasSession::open(services, Viewer::Anonymous, Some(world.id)).await;
        let before = session.snapshot().locations.clone();
        let id = before[0].id;

        let result = session.drag_marker(id, MapPosition::new(1.0, 1.0)).await;
        assert!(matches!(result, Err(AtlasError::Forbidden(_))));
        assert_eq!(session.snapshot().locations, before);
        assert_eq!(stores.locations.write_count(), 0);
    }
}
