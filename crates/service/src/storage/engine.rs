use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use models::{Entity, ObjectKey};

use super::StorageError;

/// Every visible object, keyed by `(kind, id)`.
pub type Objects = HashMap<ObjectKey, Entity>;

/// Keys touched since the last successful flush.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub upserted: HashSet<ObjectKey>,
    pub deleted: HashSet<ObjectKey>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.upserted.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upserted.len() + self.deleted.len()
    }

    pub(crate) fn record_upsert(&mut self, key: ObjectKey) {
        self.deleted.remove(&key);
        self.upserted.insert(key);
    }

    pub(crate) fn record_delete(&mut self, key: ObjectKey) {
        self.upserted.remove(&key);
        self.deleted.insert(key);
    }

    /// Unstage `key` entirely, as if it had never been touched.
    pub(crate) fn forget(&mut self, key: &ObjectKey) {
        self.upserted.remove(key);
        self.deleted.remove(key);
    }

    pub(crate) fn clear(&mut self) {
        self.upserted.clear();
        self.deleted.clear();
    }
}

/// Durable backend behind [`super::Storage`].
///
/// `flush` receives both the full visible set and the change set; whole-file
/// engines rewrite from `objects`, row-oriented engines apply `changes`.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<Objects, StorageError>;
    async fn flush(&self, objects: &Objects, changes: &ChangeSet) -> Result<(), StorageError>;
}
