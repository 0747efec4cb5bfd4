use std::collections::HashMap;
use std::sync::Arc;

use models::{Entity, EntityKind, Model, ObjectKey};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::{ChangeSet, Objects, StorageEngine, StorageError};

#[derive(Default)]
struct Inner {
    objects: Objects,
    changes: ChangeSet,
}

/// State of each touched key before its first staged write; `None` means absent.
#[derive(Debug, Default)]
struct Snapshot(HashMap<ObjectKey, Option<Entity>>);

impl Snapshot {
    fn remember(&mut self, key: &ObjectKey, prior: Option<&Entity>) {
        self.0.entry(key.clone()).or_insert_with(|| prior.cloned());
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Uniform object store used by every service.
///
/// Reads and staged writes go to the in-memory map; [`Storage::save`] flushes
/// staged changes to the engine. Each call takes the lock once, so concurrent
/// requests interleave per call and writes to the same id are last-write-wins.
/// Request handlers stage through a [`Batch`] so a failed flush is undone.
pub struct Storage {
    inner: RwLock<Inner>,
    engine: Arc<dyn StorageEngine>,
}

impl Storage {
    /// Load every object from `engine` and wrap it in a facade.
    pub async fn open(engine: Arc<dyn StorageEngine>) -> Result<Arc<Self>, StorageError> {
        let objects = engine.load().await?;
        info!(engine = engine.name(), objects = objects.len(), "storage loaded");
        Ok(Arc::new(Self {
            inner: RwLock::new(Inner { objects, changes: ChangeSet::default() }),
            engine,
        }))
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Start staging the writes of one request.
    pub fn batch(&self) -> Batch<'_> {
        Batch { storage: self, snapshot: Snapshot::default() }
    }

    /// The object of kind `T` with this id, if any. Unknown ids are just absent.
    pub async fn get<T: Model>(&self, id: &str) -> Option<T> {
        let inner = self.inner.read().await;
        inner.objects.get(&ObjectKey::new(T::KIND, id)).and_then(T::from_entity).cloned()
    }

    /// Every visible object of kind `T`, keyed by id.
    pub async fn all<T: Model>(&self) -> HashMap<String, T> {
        let inner = self.inner.read().await;
        inner
            .objects
            .values()
            .filter_map(T::from_entity)
            .map(|obj| (obj.id().to_string(), obj.clone()))
            .collect()
    }

    /// Stage a new or replaced object; visible immediately, durable after `save`.
    pub async fn insert<T: Model>(&self, obj: T) {
        self.stage_insert(obj, &mut Snapshot::default()).await;
    }

    /// Mutate an existing object in place and stage it.
    ///
    /// `id` and `created_at` survive whatever `f` does; `updated_at` is
    /// refreshed. Returns `None` when the object does not exist.
    pub async fn update<T, F>(&self, id: &str, f: F) -> Option<T>
    where
        T: Model,
        F: FnOnce(&mut T),
    {
        self.stage_update(id, f, &mut Snapshot::default()).await
    }

    /// Remove an object from view and stage its deletion. Returns whether it existed.
    pub async fn delete<T: Model>(&self, id: &str) -> bool {
        self.stage_delete::<T>(id, &mut Snapshot::default()).await
    }

    /// Number of visible objects of `kind`; always equals the size of `all` for that kind.
    pub async fn count(&self, kind: EntityKind) -> usize {
        let inner = self.inner.read().await;
        inner.objects.keys().filter(|key| key.kind == kind).count()
    }

    /// Number of staged changes not yet flushed.
    pub async fn pending(&self) -> usize {
        self.inner.read().await.changes.len()
    }

    /// Flush staged changes. A no-op when nothing is staged; on failure the
    /// changes stay staged for the next call.
    pub async fn save(&self) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        self.flush(&mut inner).await
    }

    /// Flush staged changes; on failure put every key in `snapshot` back the
    /// way it was and unstage it. The lock is held across both steps.
    async fn save_or_rollback(&self, snapshot: Snapshot) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        let result = self.flush(&mut inner).await;
        if result.is_err() {
            Self::rollback(&mut inner, snapshot);
        }
        result
    }

    /// Replace the visible set with the engine's contents, dropping staged changes.
    pub async fn reload(&self) -> Result<(), StorageError> {
        let objects = self.engine.load().await?;
        let mut inner = self.inner.write().await;
        let dropped = inner.changes.len();
        inner.objects = objects;
        inner.changes.clear();
        info!(engine = self.engine.name(), objects = inner.objects.len(), dropped, "storage reloaded");
        Ok(())
    }

    async fn stage_insert<T: Model>(&self, obj: T, snapshot: &mut Snapshot) {
        let key = obj.key();
        let mut inner = self.inner.write().await;
        snapshot.remember(&key, inner.objects.get(&key));
        inner.objects.insert(key.clone(), obj.into_entity());
        inner.changes.record_upsert(key);
    }

    async fn stage_update<T, F>(&self, id: &str, f: F, snapshot: &mut Snapshot) -> Option<T>
    where
        T: Model,
        F: FnOnce(&mut T),
    {
        let key = ObjectKey::new(T::KIND, id);
        let mut inner = self.inner.write().await;
        let mut obj = inner.objects.get(&key).and_then(T::from_entity)?.clone();
        snapshot.remember(&key, inner.objects.get(&key));
        let original = obj.base().clone();
        f(&mut obj);
        let base = obj.base_mut();
        base.id = original.id;
        base.created_at = original.created_at;
        base.touch();
        inner.objects.insert(key.clone(), obj.clone().into_entity());
        inner.changes.record_upsert(key);
        Some(obj)
    }

    async fn stage_delete<T: Model>(&self, id: &str, snapshot: &mut Snapshot) -> bool {
        let key = ObjectKey::new(T::KIND, id);
        let mut inner = self.inner.write().await;
        let Some(prior) = inner.objects.remove(&key) else {
            return false;
        };
        snapshot.remember(&key, Some(&prior));
        inner.changes.record_delete(key);
        true
    }

    async fn flush(&self, inner: &mut Inner) -> Result<(), StorageError> {
        if inner.changes.is_empty() {
            return Ok(());
        }
        let pending = inner.changes.len();
        if let Err(e) = self.engine.flush(&inner.objects, &inner.changes).await {
            error!(engine = self.engine.name(), pending, error = %e, "storage flush failed");
            return Err(e);
        }
        inner.changes.clear();
        debug!(engine = self.engine.name(), flushed = pending, "storage flushed");
        Ok(())
    }

    fn rollback(inner: &mut Inner, snapshot: Snapshot) {
        let restored = snapshot.len();
        for (key, prior) in snapshot.0 {
            match prior {
                Some(entity) => {
                    inner.objects.insert(key.clone(), entity);
                }
                None => {
                    inner.objects.remove(&key);
                }
            }
            inner.changes.forget(&key);
        }
        warn!(restored, "staged changes rolled back");
    }
}

/// Staged writes of one request, with the state they replaced.
///
/// [`Batch::commit`] flushes them; when the flush fails every touched object
/// is restored, so a request that reports a storage error leaves no trace.
pub struct Batch<'a> {
    storage: &'a Storage,
    snapshot: Snapshot,
}

impl<'a> Batch<'a> {
    pub fn storage(&self) -> &'a Storage {
        self.storage
    }

    pub async fn insert<T: Model>(&mut self, obj: T) {
        self.storage.stage_insert(obj, &mut self.snapshot).await;
    }

    pub async fn update<T, F>(&mut self, id: &str, f: F) -> Option<T>
    where
        T: Model,
        F: FnOnce(&mut T),
    {
        self.storage.stage_update(id, f, &mut self.snapshot).await
    }

    pub async fn delete<T: Model>(&mut self, id: &str) -> bool {
        self.storage.stage_delete::<T>(id, &mut self.snapshot).await
    }

    pub async fn commit(self) -> Result<(), StorageError> {
        self.storage.save_or_rollback(self.snapshot).await
    }
}
