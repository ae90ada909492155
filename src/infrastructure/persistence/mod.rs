//! SQLite persistence adapters
//!
//! This module implements the repository ports on top of a single SQLite
//! database, one table per content collection.

mod connection;
mod location_repository;
mod lore_repository;
mod monster_repository;
mod note_repository;
mod rows;
mod rule_repository;
mod world_repository;

pub use connection::SqliteStore;
pub use location_repository::SqliteLocationRepository;
pub use lore_repository::SqliteLoreRepository;
pub use monster_repository::SqliteMonsterRepository;
pub use note_repository::SqliteNoteRepository;
pub use rule_repository::SqliteRuleRepository;
pub use world_repository::SqliteWorldRepository;

use anyhow::Result;

/// Combined repository providing access to all collection repositories
#[derive(Clone)]
pub struct SqliteRepository {
    store: SqliteStore,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let store = SqliteStore::connect(database_url).await?;
        store.initialize_schema().await?;
        Ok(Self { store })
    }

    pub async fn in_memory() -> Result<Self> {
        let store = SqliteStore::in_memory().await?;
        store.initialize_schema().await?;
        Ok(Self { store })
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn worlds(&self) -> SqliteWorldRepository {
        SqliteWorldRepository::new(self.store.clone())
    }

    pub fn locations(&self) -> SqliteLocationRepository {
        SqliteLocationRepository::new(self.store.clone())
    }

    pub fn lore(&self) -> SqliteLoreRepository {
        SqliteLoreRepository::new(self.store.clone())
    }

    pub fn rules(&self) -> SqliteRuleRepository {
        SqliteRuleRepository::new(self.store.clone())
    }

    pub fn monsters(&self) -> SqliteMonsterRepository {
        SqliteMonsterRepository::new(self.store.clone())
    }

    pub fn notes(&self) -> SqliteNoteRepository {
        SqliteNoteRepository::new(self.store.clone())
    }
}

/// In-memory repository holding one stored world
#[cfg(test)]
pub(crate) async fn test_repository() -> (SqliteRepository, crate::domain::entities::World) {
    use crate::domain::entities::World;
    use crate::domain::value_objects::UserId;

    let repo = SqliteRepository::in_memory().await.unwrap();
    let world = World::new(UserId::new(), "Faerun");
    repo.worlds().create(&world).await.unwrap();
    (repo, world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Location, LoreEntry};
    use crate::domain::value_objects::MapPosition;

    #[tokio::test]
    async fn test_world_delete_cascades_to_content() {
        let (repo, world) = test_repository().await;
        repo.locations()
            .create(&Location::new(world.id, "Luskan", MapPosition::center()))
            .await
            .unwrap();
        repo.lore()
            .create(&LoreEntry::new(world.id, "Time of Troubles"))
            .await
            .unwrap();

        repo.worlds().delete(world.id).await.unwrap();

        assert!(repo.locations().list_by_world(world.id).await.unwrap().is_empty());
        assert!(repo.lore().list_by_world(world.id).await.unwrap().is_empty());
    }
}
