//! In-memory port implementations for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::outbound::{ContentRepositoryPort, WorldRepositoryPort};
use crate::domain::entities::{World, WorldContent};
use crate::domain::value_objects::{UserId, WorldId};

/// Map-backed content store that counts writes and can be told to fail
pub(crate) struct TestStore<T: WorldContent> {
    rows: Mutex<HashMap<T::Id, T>>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl<T: WorldContent> Default for TestStore<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }
}

impl<T: WorldContent> TestStore<T> {
    pub(crate) fn failing() -> Self {
        let store = Self::default();
        store.fail_reads(true);
        store.fail_writes(true);
        store
    }

    pub(crate) fn seed(&self, row: T) {
        self.rows.lock().unwrap().insert(row.id(), row);
    }

    pub(crate) fn row(&self, id: T::Id) -> Option<T> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub(crate) fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("store unavailable for reads");
        }
        Ok(())
    }

    fn write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("store unavailable for writes");
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl<T: WorldContent> ContentRepositoryPort<T> for TestStore<T> {
    async fn list_by_world(&self, world_id: WorldId) -> Result<Vec<T>> {
        self.read()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.world_id().map_or(true, |w| w == world_id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: T::Id) -> Result<Option<T>> {
        self.read()?;
        Ok(self.row(id))
    }

    async fn create(&self, row: &T) -> Result<()> {
        self.write()?;
        self.seed(row.clone());
        Ok(())
    }

    async fn update(&self, row: &T) -> Result<()> {
        self.write()?;
        self.seed(row.clone());
        Ok(())
    }

    async fn delete(&self, id: T::Id) -> Result<()> {
        self.write()?;
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Map-backed world store
#[derive(Default)]
pub(crate) struct TestWorldStore {
    worlds: Mutex<HashMap<WorldId, World>>,
    fail: AtomicBool,
}

impl TestWorldStore {
    pub(crate) fn seed(&self, world: World) {
        self.worlds.lock().unwrap().insert(world.id, world);
    }

    pub(crate) fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("world store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl WorldRepositoryPort for TestWorldStore {
    async fn create(&self, world: &World) -> Result<()> {
        self.check()?;
        self.seed(world.clone());
        Ok(())
    }

    async fn get(&self, id: WorldId) -> Result<Option<World>> {
        self.check()?;
        Ok(self.worlds.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<World>> {
        self.check()?;
        let mut worlds: Vec<World> = self
            .worlds
            .lock()
            .unwrap()
            .values()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect();
        worlds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(worlds)
    }

    async fn update(&self, world: &World) -> Result<()> {
        self.check()?;
        self.seed(world.clone());
        Ok(())
    }

    async fn delete(&self, id: WorldId) -> Result<()> {
        self.check()?;
        self.worlds.lock().unwrap().remove(&id);
        Ok(())
    }
}
