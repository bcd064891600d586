use super::config::HubConfig;
use crate::core::{Entity, ListQuery};
use crate::seed::SeedManager;
use crate::storage::BackingStore;
use crate::store::RecordStore;
use std::sync::Arc;

/// Front door binding one backing store and one configuration.
///
/// This is the recommended way to use flatstore in applications: build the
/// backing store once at startup, wrap it in a hub, run the seeder, then
/// open one typed [`RecordStore`] per entity type.
///
/// # Examples
///
/// ```
/// use flatstore::{EntityBase, InMemoryBackingStore, StoreHub, impl_entity};
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
/// let hub = StoreHub::new(Arc::new(InMemoryBackingStore::new()));
/// let categories = hub.open::<Category>("erp.master.category");
///
/// categories
///     .create(Category {
///         base: EntityBase::new("PAINT", "Paint", true),
///         description: "Paint products".to_string(),
///     })
///     .await?;
///
/// let page = categories.list(&hub.query(Some("paint"))).await;
/// assert_eq!(page.total, 1);
/// # Ok::<(), flatstore::StoreError>(())
/// # }).unwrap();
/// ```
pub struct StoreHub {
    backing: Arc<dyn BackingStore>,
    config: HubConfig,
}

impl StoreHub {
    pub fn new(backing: Arc<dyn BackingStore>) -> Self {
        Self {
            backing,
            config: HubConfig::default(),
        }
    }

    pub fn with_config(backing: Arc<dyn BackingStore>, config: HubConfig) -> Self {
        Self { backing, config }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn backing(&self) -> Arc<dyn BackingStore> {
        self.backing.clone()
    }

    /// Opens the record store for one entity type's namespace.
    pub fn open<T: Entity>(&self, namespace: impl Into<String>) -> RecordStore<T> {
        RecordStore::new(self.backing.clone(), namespace)
            .with_id_prefix(self.config.id_prefix.clone())
    }

    /// A seeder bound to this hub's backing store and sentinel key.
    pub fn seeder(&self) -> SeedManager {
        SeedManager::new(self.backing.clone(), self.config.sentinel_key.clone())
            .with_id_prefix(self.config.id_prefix.clone())
    }

    /// First-page query with the configured page size.
    pub fn query(&self, text: Option<&str>) -> ListQuery {
        ListQuery {
            text: text.map(str::to_string),
            page: 1,
            page_size: self.config.default_page_size,
        }
    }
}
