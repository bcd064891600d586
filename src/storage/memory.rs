use super::backing::{BackingError, BackingResult, BackingStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile backing store: a plain map behind a lock.
///
/// The default medium for tests and for hosts that run without persistence.
/// An optional byte capacity (keys + values) makes it behave like a
/// quota-limited medium.
pub struct InMemoryBackingStore {
    entries: RwLock<HashMap<String, String>>,
    max_bytes: Option<usize>,
}

impl InMemoryBackingStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_bytes: None,
        }
    }

    /// Store that rejects writes once keys plus values exceed `max_bytes`.
    pub fn with_capacity_bytes(max_bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_bytes: Some(max_bytes),
        }
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    fn usage(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(key, value)| key.len() + value.len()).sum()
    }
}

impl Default for InMemoryBackingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackingStore for InMemoryBackingStore {
    async fn get(&self, key: &str) -> BackingResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> BackingResult<()> {
        let mut entries = self.entries.write().await;

        if let Some(max_bytes) = self.max_bytes {
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let next = Self::usage(&entries) - replaced + key.len() + value.len();
            if next > max_bytes {
                return Err(BackingError::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> BackingResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
