use async_trait::async_trait;
use models::{record, Entity, EntityKind, ObjectKey};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use tracing::debug;

use super::{ChangeSet, Objects, StorageEngine, StorageError};

/// Relational engine over the `record` table, one row per object.
///
/// A flush upserts changed rows and deletes removed ones inside a single
/// transaction, so a failed flush leaves the table as it was.
pub struct DbEngine {
    db: DatabaseConnection,
}

impl DbEngine {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn decode_row(row: record::Model) -> Result<(ObjectKey, Entity), StorageError> {
    let kind: EntityKind = row
        .kind
        .parse()
        .map_err(|e| StorageError::Db(format!("record {}.{}: {e}", row.kind, row.id)))?;
    let key = ObjectKey::new(kind, row.id);
    let entity: Entity =
        serde_json::from_value(row.data).map_err(|e| StorageError::Db(format!("record {key}: {e}")))?;
    if entity.key() != key {
        return Err(StorageError::Db(format!("record {key} holds {}", entity.key())));
    }
    Ok((key, entity))
}

#[async_trait]
impl StorageEngine for DbEngine {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn load(&self) -> Result<Objects, StorageError> {
        let rows = record::Entity::find().all(&self.db).await?;
        rows.into_iter().map(decode_row).collect()
    }

    async fn flush(&self, objects: &Objects, changes: &ChangeSet) -> Result<(), StorageError> {
        let txn = self.db.begin().await?;

        for key in &changes.upserted {
            let Some(entity) = objects.get(key) else { continue };
            let row = record::ActiveModel {
                kind: Set(key.kind.to_string()),
                id: Set(key.id.clone()),
                data: Set(serde_json::to_value(entity)?),
                updated_at: Set(entity.base().updated_at.into()),
            };
            record::Entity::insert(row)
                .on_conflict(
                    OnConflict::columns([record::Column::Kind, record::Column::Id])
                        .update_columns([record::Column::Data, record::Column::UpdatedAt])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        for key in &changes.deleted {
            record::Entity::delete_many()
                .filter(record::Column::Kind.eq(key.kind.as_str()))
                .filter(record::Column::Id.eq(key.id.as_str()))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        debug!(upserted = changes.upserted.len(), deleted = changes.deleted.len(), "storage rows written");
        Ok(())
    }
}
