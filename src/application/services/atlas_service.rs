//! Atlas Service - everything one viewer sees of one world
//!
//! Bundles the world service with the five content services and assembles the
//! atlas snapshot a browser renders: the selected world, whether edit controls
//! are shown, and every collection filtered through the visibility gate.

use std::sync::Arc;

use futures_util::future::join5;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::content_service::ContentService;
use super::world_service::WorldService;
use crate::domain::entities::{DmNote, Location, LoreEntry, Monster, RuleEntry, World, WorldContent};
use crate::domain::services::{ViewerRole, WorldAccess};
use crate::domain::value_objects::{Viewer, WorldId};

/// All application services, cheap to clone
#[derive(Clone)]
pub struct AtlasServices {
    pub worlds: Arc<dyn WorldService>,
    pub locations: ContentService<Location>,
    pub lore: ContentService<LoreEntry>,
    pub rules: ContentService<RuleEntry>,
    pub monsters: ContentService<Monster>,
    pub notes: ContentService<DmNote>,
}

/// Picks the content service for a collection type
pub trait AtlasContent: WorldContent {
    fn service(services: &AtlasServices) -> &ContentService<Self>;
}

impl AtlasContent for Location {
    fn service(services: &AtlasServices) -> &ContentService<Self> {
        &services.locations
    }
}

impl AtlasContent for LoreEntry {
    fn service(services: &AtlasServices) -> &ContentService<Self> {
        &services.lore
    }
}

impl AtlasContent for RuleEntry {
    fn service(services: &AtlasServices) -> &ContentService<Self> {
        &services.rules
    }
}

impl AtlasContent for Monster {
    fn service(services: &AtlasServices) -> &ContentService<Self> {
        &services.monsters
    }
}

impl AtlasContent for DmNote {
    fn service(services: &AtlasServices) -> &ContentService<Self> {
        &services.notes
    }
}

/// What a viewer sees of the atlas at one moment
#[derive(Debug, Clone, Default, Serialize)]
pub struct AtlasSnapshot {
    pub viewer: Viewer,
    /// The selected world, `None` for the world-selection screen
    pub world: Option<World>,
    pub role: Option<ViewerRole>,
    /// Whether mutation controls should be offered at all
    pub can_edit: bool,
    /// Worlds the viewer owns, for the selection screen
    pub worlds: Vec<World>,
    pub locations: Vec<Location>,
    pub lore: Vec<LoreEntry>,
    pub rules: Vec<RuleEntry>,
    pub monsters: Vec<Monster>,
    pub notes: Vec<DmNote>,
}

impl AtlasServices {
    pub fn content<T: AtlasContent>(&self) -> &ContentService<T> {
        T::service(self)
    }

    /// Open `selected` for `viewer`; `None` when nothing is selected or it
    /// cannot be opened
    pub async fn open(&self, selected: Option<WorldId>, viewer: Viewer) -> Option<WorldAccess> {
        match selected {
            Some(world_id) => self.worlds.open_world(world_id, viewer).await,
            None => None,
        }
    }

    /// Build the atlas snapshot for an optional selected world id
    #[instrument(skip(self))]
    pub async fn snapshot(&self, selected: Option<WorldId>, viewer: Viewer) -> AtlasSnapshot {
        let access = self.open(selected, viewer).await;
        self.snapshot_for(access.as_ref(), viewer).await
    }

    /// Build the snapshot for an already evaluated gate. Each collection is
    /// fetched concurrently and degrades on its own.
    pub async fn snapshot_for(&self, access: Option<&WorldAccess>, viewer: Viewer) -> AtlasSnapshot {
        let worlds = self.owned_worlds(viewer).await;

        let Some(access) = access else {
            debug!(viewer = %viewer, "No world selected");
            return AtlasSnapshot {
                viewer,
                worlds,
                ..AtlasSnapshot::default()
            };
        };

        let (locations, lore, rules, monsters, notes) = join5(
            self.locations.list_visible(access),
            self.lore.list_visible(access),
            self.rules.list_visible(access),
            self.monsters.list_visible(access),
            self.notes.list_visible(access),
        )
        .await;

        AtlasSnapshot {
            viewer,
            world: Some(access.world().clone()),
            role: Some(access.role()),
            can_edit: access.can_mutate(),
            worlds,
            locations,
            lore,
            rules,
            monsters,
            notes,
        }
    }

    async fn owned_worlds(&self, viewer: Viewer) -> Vec<World> {
        if !viewer.is_authenticated() {
            return Vec::new();
        }
        match self.worlds.list_worlds(viewer).await {
            Ok(worlds) => worlds,
            Err(e) => {
                warn!(viewer = %viewer, error = %e, "Failed to list worlds; showing none");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::ports::outbound::{ContentRepositoryPort, WorldRepositoryPort};
    use crate::application::services::test_support::{TestStore, TestWorldStore};
    use crate::application::services::WorldServiceImpl;
    use crate::domain::entities::{NoteCategory, StatBlock};
    use crate::domain::value_objects::{MapPosition, UserId};

    pub(crate) struct Stores {
        pub worlds: Arc<TestWorldStore>,
        pub locations: Arc<TestStore<Location>>,
        pub lore: Arc<TestStore<LoreEntry>>,
        pub rules: Arc<TestStore<RuleEntry>>,
        pub monsters: Arc<TestStore<Monster>>,
        pub notes: Arc<TestStore<DmNote>>,
    }

    pub(crate) fn services() -> (Stores, AtlasServices) {
        let stores = Stores {
            worlds: Arc::new(TestWorldStore::default()),
            locations: Arc::new(TestStore::default()),
            lore: Arc::new(TestStore::default()),
            rules: Arc::new(TestStore::default()),
            monsters: Arc::new(TestStore::default()),
            notes: Arc::new(TestStore::default()),
        };
        let services = AtlasServices {
            worlds: Arc::new(WorldServiceImpl::new(
                stores.worlds.clone() as Arc<dyn WorldRepositoryPort>
            )),
            locations: ContentService::new(
                stores.locations.clone() as Arc<dyn ContentRepositoryPort<Location>>
            ),
            lore: ContentService::new(stores.lore.clone() as Arc<dyn ContentRepositoryPort<LoreEntry>>),
            rules: ContentService::new(stores.rules.clone() as Arc<dyn ContentRepositoryPort<RuleEntry>>),
            monsters: ContentService::new(
                stores.monsters.clone() as Arc<dyn ContentRepositoryPort<Monster>>
            ),
            notes: ContentService::new(stores.notes.clone() as Arc<dyn ContentRepositoryPort<DmNote>>),
        };
        (stores, services)
    }

    /// A public world with one private and one public row per category
    pub(crate) fn seed_world(stores: &Stores, owner: UserId) -> World {
        let world = World::new(owner, "Faerun").public(true);
        stores.worlds.seed(world.clone());
        for is_public in [false, true] {
            stores.locations.seed(
                Location::new(world.id, "Waterdeep", MapPosition::new(500.0, 400.0)).public(is_public),
            );
            stores.lore.seed(LoreEntry::new(world.id, "Founding").public(is_public));
            stores.rules.seed(RuleEntry::new(world.id, "Flanking", "Combat").public(is_public));
            stores
                .monsters
                .seed(Monster::new(world.id, StatBlock::new("Beholder")).public(is_public));
            stores
                .notes
                .seed(DmNote::new(world.id, "Villain", NoteCategory::Secret).public(is_public));
        }
        world
    }

    #[tokio::test]
    async fn test_owner_snapshot_has_everything() {
        let (stores, services) = services();
        let owner = UserId::new();
        let world = seed_world(&stores, owner);

        let snapshot = services
            .snapshot(Some(world.id), Viewer::Authenticated(owner))
            .await;
        assert_eq!(snapshot.role, Some(ViewerRole::Owner));
        assert!(snapshot.can_edit);
        assert_eq!(snapshot.worlds.len(), 1);
        assert_eq!(snapshot.locations.len(), 2);
        assert_eq!(snapshot.lore.len(), 2);
        assert_eq!(snapshot.rules.len(), 2);
        assert_eq!(snapshot.monsters.len(), 2);
        assert_eq!(snapshot.notes.len(), 2);
    }

    #[tokio::test]
    async fn test_shared_link_guest_sees_public_rows_only() {
        let (stores, services) = services();
        let world = seed_world(&stores, UserId::new());

        let snapshot = services
            .snapshot(Some(world.id), Viewer::Authenticated(UserId::new()))
            .await;
        assert_eq!(snapshot.role, Some(ViewerRole::Guest));
        assert!(!snapshot.can_edit);
        assert!(snapshot.worlds.is_empty());
        assert!(snapshot.locations.iter().all(|r| r.is_public));
        assert_eq!(snapshot.locations.len(), 1);
        assert_eq!(snapshot.lore.len(), 1);
        assert_eq!(snapshot.rules.len(), 1);
        assert_eq!(snapshot.monsters.len(), 1);
        assert_eq!(snapshot.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_unselected_snapshot() {
        let (stores, services) = services();
        let owner = UserId::new();
        seed_world(&stores, owner);

        let none = services.snapshot(None, Viewer::Authenticated(owner)).await;
        assert!(none.world.is_none());
        assert!(!none.can_edit);
        assert_eq!(none.worlds.len(), 1);
        assert!(none.locations.is_empty());

        let unknown = services.snapshot(Some(WorldId::new()), Viewer::Anonymous).await;
        assert!(unknown.world.is_none());
        assert!(unknown.worlds.is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_collection_does_not_block_the_rest() {
        let (stores, services) = services();
        let owner = UserId::new();
        let world = seed_world(&stores, owner);
        stores.lore.fail_reads(true);

        let snapshot = services
            .snapshot(Some(world.id), Viewer::Authenticated(owner))
            .await;
        assert!(snapshot.world.is_some());
        assert!(snapshot.lore.is_empty());
        assert_eq!(snapshot.locations.len(), 2);
        assert_eq!(snapshot.notes.len(), 2);
    }
}
