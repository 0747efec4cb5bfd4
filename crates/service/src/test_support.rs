#![cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use models::{EntityKind, ObjectKey};

use crate::storage::{ChangeSet, Objects, Storage, StorageEngine, StorageError};

/// In-memory engine that records flushes and can be switched to fail.
#[derive(Default)]
pub struct MemoryEngine {
    stored: Mutex<Objects>,
    flushes: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryEngine {
    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.stored.lock().unwrap().contains_key(&ObjectKey::new(kind, id))
    }
}

#[async_trait]
impl StorageEngine for MemoryEngine {
    fn name(&self) -> &'static str { "memory" }

    async fn load(&self) -> Result<Objects, StorageError> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn flush(&self, objects: &Objects, _changes: &ChangeSet) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Db("engine offline".into()));
        }
        *self.stored.lock().unwrap() = objects.clone();
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub async fn memory_storage() -> (Arc<MemoryEngine>, Arc<Storage>) {
    let engine = Arc::new(MemoryEngine::default());
    let storage = Storage::open(engine.clone()).await.expect("open memory storage");
    (engine, storage)
}

/// DB-backed tests run only when a database is configured and not explicitly skipped.
pub fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}

pub async fn get_db() -> anyhow::Result<sea_orm::DatabaseConnection> {
    use migration::MigratorTrait;
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
