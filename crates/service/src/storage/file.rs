use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use models::{Entity, ObjectKey};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use super::{ChangeSet, Objects, StorageEngine, StorageError};

/// Whole-file JSON engine.
///
/// The file holds one object mapping `Kind.id` to the tagged entity. Every
/// flush rewrites the file through a temp file and a rename, so readers never
/// see a half-written document.
pub struct FileEngine {
    path: PathBuf,
}

impl FileEngine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn decode(&self, content: &str) -> Result<Objects, StorageError> {
        if content.trim().is_empty() {
            return Ok(Objects::new());
        }
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(content).map_err(|e| StorageError::corrupt(&self.path, e.to_string()))?;

        let mut objects = Objects::with_capacity(raw.len());
        for (key, value) in raw {
            let key: ObjectKey = key.parse().map_err(|e| StorageError::corrupt(&self.path, format!("{e}")))?;
            let entity: Entity = serde_json::from_value(value)
                .map_err(|e| StorageError::corrupt(&self.path, format!("{key}: {e}")))?;
            if entity.key() != key {
                return Err(StorageError::corrupt(&self.path, format!("{key} holds {}", entity.key())));
            }
            objects.insert(key, entity);
        }
        Ok(objects)
    }
}

#[async_trait]
impl StorageEngine for FileEngine {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Objects, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Objects::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        self.decode(&content)
    }

    async fn flush(&self, objects: &Objects, changes: &ChangeSet) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| StorageError::io(parent, e))?;
        }

        // Sorted keys keep the file stable between flushes.
        let document: BTreeMap<String, &Entity> =
            objects.iter().map(|(key, entity)| (key.to_string(), entity)).collect();
        let content = serde_json::to_vec(&document)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, content).await.map_err(|e| StorageError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).await.map_err(|e| StorageError::io(&self.path, e))?;

        debug!(path = %self.path.display(), objects = objects.len(), changes = changes.len(), "storage file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use models::amenity::NewAmenity;
    use models::state::NewState;
    use models::{Amenity, EntityKind, Model, State};
    use std::path::Path;
    use std::sync::Arc;

    fn temp_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("hbnb_file_engine_{}", uuid::Uuid::new_v4()))
            .join("file.json")
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_store() -> Result<(), anyhow::Error> {
        let engine = FileEngine::new(temp_file());
        assert!(engine.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn saved_objects_survive_reopen() -> Result<(), anyhow::Error> {
        let path = temp_file();
        let storage = Storage::open(Arc::new(FileEngine::new(&path))).await?;
        let state = State::new(NewState { name: "California".into() });
        let wifi = Amenity::new(NewAmenity { name: "Wifi".into() });
        storage.insert(state.clone()).await;
        storage.insert(wifi.clone()).await;
        storage.save().await?;

        let reopened = Storage::open(Arc::new(FileEngine::new(&path))).await?;
        assert_eq!(reopened.get::<State>(&state.base.id).await, Some(state.clone()));
        assert_eq!(reopened.get::<Amenity>(&wifi.base.id).await, Some(wifi.clone()));
        assert_eq!(reopened.count(EntityKind::State).await, 1);

        let raw: Value = serde_json::from_slice(&fs::read(&path).await?)?;
        let entry = &raw[format!("State.{}", state.base.id)];
        assert_eq!(entry["__class__"], "State");
        assert_eq!(entry["name"], "California");
        assert!(!engine_temp_exists(&path).await);

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    async fn engine_temp_exists(path: &Path) -> bool {
        fs::metadata(FileEngine::new(path).temp_path()).await.is_ok()
    }

    #[tokio::test]
    async fn deletes_are_dropped_from_the_file() -> Result<(), anyhow::Error> {
        let path = temp_file();
        let storage = Storage::open(Arc::new(FileEngine::new(&path))).await?;
        let state = State::new(NewState { name: "Nevada".into() });
        storage.insert(state.clone()).await;
        storage.save().await?;
        storage.delete::<State>(&state.base.id).await;
        storage.save().await?;

        let objects = FileEngine::new(&path).load().await?;
        assert!(objects.is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let path = temp_file();
        fs::create_dir_all(path.parent().unwrap()).await?;
        fs::write(&path, b"{not json").await?;
        let err = FileEngine::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));

        fs::write(&path, br#"{"Town.1": {"__class__": "State", "id": "1"}}"#).await?;
        assert!(FileEngine::new(&path).load().await.is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn mismatched_key_is_corrupt() -> Result<(), anyhow::Error> {
        let path = temp_file();
        fs::create_dir_all(path.parent().unwrap()).await?;
        let state = State::new(NewState { name: "Utah".into() });
        let mut doc = serde_json::Map::new();
        doc.insert("State.other".into(), serde_json::to_value(state.into_entity())?);
        fs::write(&path, serde_json::to_vec(&doc)?).await?;

        let err = FileEngine::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
