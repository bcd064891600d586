//! Generic typed CRUD and query over one backing-store namespace.

use crate::core::record::generate_id;
use crate::core::{Entity, ListQuery, RecordPage, Result, StoreError};
use crate::storage::codec::{self, json_kind};
use crate::storage::BackingStore;
use chrono::Utc;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Id prefix used when a store is not given its own.
pub const DEFAULT_ID_PREFIX: &str = "rec";

/// A homogeneous collection of entities serialized as one JSON array under
/// one backing-store key.
///
/// Every operation is read-modify-write on the whole array; there is no
/// partial-key update and no cross-writer coordination. Interleaved writers
/// on the same namespace are last-write-wins at array granularity, which is
/// the deployment contract of a single-user host.
///
/// # Examples
///
/// ```
/// use flatstore::{EntityBase, InMemoryBackingStore, ListQuery, RecordStore, impl_entity};
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Category {
///     #[serde(flatten)]
///     base: EntityBase,
///     description: String,
/// }
///
/// impl_entity!(Category);
///
/// # tokio_test::block_on(async {
/// let store: RecordStore<Category> =
///     RecordStore::new(Arc::new(InMemoryBackingStore::new()), "erp.master.category");
///
/// let id = store
///     .create(Category {
///         base: EntityBase::new("PAINT", "Paint", true),
///         description: "Paint products".to_string(),
///     })
///     .await?;
///
/// let page = store.list(&ListQuery::page(1, 10)).await;
/// assert_eq!(page.total, 1);
/// assert_eq!(store.get(&id).await?.base.code, "PAINT");
/// # Ok::<(), flatstore::StoreError>(())
/// # }).unwrap();
/// ```
#[derive(Clone)]
pub struct RecordStore<T: Entity> {
    backing: Arc<dyn BackingStore>,
    namespace: String,
    id_prefix: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: Entity> RecordStore<T> {
    pub fn new(backing: Arc<dyn BackingStore>, namespace: impl Into<String>) -> Self {
        Self {
            backing,
            namespace: namespace.into(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            _record: PhantomData,
        }
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn load(&self) -> Vec<T> {
        codec::load_namespace(self.backing.as_ref(), &self.namespace).await
    }

    async fn save(&self, records: &[T]) -> Result<()> {
        codec::save_namespace(self.backing.as_ref(), &self.namespace, records).await
    }

    /// Lists one page of records, most recently updated first.
    ///
    /// Non-blank `text` filters to records whose `code` or `name` contains
    /// it case-insensitively; the reported `total` is the filtered count
    /// before pagination, so it is stable across pages.
    pub async fn list(&self, query: &ListQuery) -> RecordPage<T> {
        let mut records = self.load().await;

        let needle = query
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);
        if let Some(needle) = &needle {
            records.retain(|record| {
                record.code().to_lowercase().contains(needle)
                    || record.name().to_lowercase().contains(needle)
            });
        }

        sort_most_recent_first(&mut records);

        let total = records.len() as u64;
        let page = query.page.max(1);
        let page_size = query.page_size;
        let (data, total_pages) = if page_size == 0 {
            (Vec::new(), 0)
        } else {
            let skip = (page as usize - 1) * page_size as usize;
            let data = records
                .into_iter()
                .skip(skip)
                .take(page_size as usize)
                .collect();
            (data, total.div_ceil(page_size as u64) as u32)
        };

        RecordPage {
            data,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// All records, most recently updated first.
    pub async fn get_all(&self) -> Vec<T> {
        let mut records = self.load().await;
        sort_most_recent_first(&mut records);
        records
    }

    pub async fn get(&self, id: &str) -> Result<T> {
        self.load()
            .await
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string(), self.namespace.clone()))
    }

    /// Appends a new record, overwriting the payload's `id` and timestamps,
    /// and returns the generated id.
    pub async fn create(&self, mut record: T) -> Result<String> {
        let mut records = self.load().await;

        let id = generate_id(&self.id_prefix);
        let now = Utc::now();
        record.set_id(id.clone());
        record.set_created_at(now);
        record.set_updated_at(now);
        records.push(record);

        self.save(&records).await?;
        Ok(id)
    }

    /// Shallow-merges the fields of a JSON object patch onto the stored
    /// record and bumps `updatedAt`.
    ///
    /// `id` and `createdAt` in the patch are ignored; they keep their stored
    /// values. A patch field that breaks the record type fails with
    /// [`StoreError::InvalidPatch`] and leaves the namespace untouched.
    pub async fn update(&self, id: &str, patch: Value) -> Result<()> {
        let patch_fields = match patch {
            Value::Object(fields) => fields,
            other => {
                return Err(StoreError::InvalidPatch(format!(
                    "patch must be a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut records = self.load().await;
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string(), self.namespace.clone()))?;

        let existing = &records[position];
        let created_at = existing.created_at();

        let Value::Object(mut merged) = serde_json::to_value(existing)? else {
            return Err(StoreError::Serialization(format!(
                "record '{}' did not serialize to a JSON object",
                id
            )));
        };
        for (key, value) in patch_fields {
            merged.insert(key, value);
        }

        let mut updated: T = serde_json::from_value(Value::Object(merged))
            .map_err(|err| StoreError::InvalidPatch(err.to_string()))?;
        updated.set_id(id.to_string());
        updated.set_created_at(created_at);
        updated.set_updated_at(Utc::now());

        records[position] = updated;
        self.save(&records).await
    }

    /// Number of records in the namespace, filters aside.
    pub async fn count(&self) -> usize {
        self.load().await.len()
    }
}

fn sort_most_recent_first<T: Entity>(records: &mut [T]) {
    // Stable sort: equal timestamps keep their original array order.
    records.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityBase;
    use chrono::{Duration, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Item {
        #[serde(flatten)]
        base: EntityBase,
    }

    crate::impl_entity!(Item);

    fn item_updated_at(code: &str, updated_at: chrono::DateTime<Utc>) -> Item {
        let mut base = EntityBase::new(code, code, true);
        base.updated_at = updated_at;
        Item { base }
    }

    #[test]
    fn test_sort_is_descending_by_updated_at() {
        let now = Utc::now();
        let mut records = vec![
            item_updated_at("OLD", now - Duration::hours(2)),
            item_updated_at("NEW", now),
            item_updated_at("MID", now - Duration::hours(1)),
        ];

        sort_most_recent_first(&mut records);

        let codes: Vec<&str> = records.iter().map(|r| r.base.code.as_str()).collect();
        assert_eq!(codes, ["NEW", "MID", "OLD"]);
    }

    #[test]
    fn test_sort_keeps_original_order_on_ties() {
        let now = Utc::now();
        let mut records = vec![
            item_updated_at("FIRST", now),
            item_updated_at("SECOND", now),
            item_updated_at("THIRD", now),
        ];

        sort_most_recent_first(&mut records);

        let codes: Vec<&str> = records.iter().map(|r| r.base.code.as_str()).collect();
        assert_eq!(codes, ["FIRST", "SECOND", "THIRD"]);
    }
}
