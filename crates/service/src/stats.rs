use std::collections::BTreeMap;

use models::EntityKind;

use crate::storage::Storage;

/// Object count per collection name, e.g. `{"amenities": 3, ...}`.
pub async fn stats(storage: &Storage) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for kind in EntityKind::ALL {
        counts.insert(kind.collection(), storage.count(kind).await);
    }
    counts
}
