//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use async_trait::async_trait;
use flatstore::{
    BackingError, BackingResult, BackingStore, EntityBase, InMemoryBackingStore, impl_entity,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: EntityBase,
    pub description: String,
}

impl Category {
    pub fn draft(code: &str, name: &str, description: &str) -> Self {
        Self {
            base: EntityBase::new(code, name, true),
            description: description.to_string(),
        }
    }
}

impl_entity!(Category);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(flatten)]
    pub base: EntityBase,
    pub city: String,
    pub capacity: u32,
}

impl Warehouse {
    pub fn draft(code: &str, name: &str, city: &str, capacity: u32) -> Self {
        Self {
            base: EntityBase::new(code, name, true),
            city: city.to_string(),
            capacity,
        }
    }
}

impl_entity!(Warehouse);

/// Backing store that can be switched off to simulate an absent medium.
pub struct FlakyBackingStore {
    inner: InMemoryBackingStore,
    unavailable: AtomicBool,
}

impl FlakyBackingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBackingStore::new(),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.contains(key).await
    }

    fn check(&self) -> BackingResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(BackingError::Unavailable("switched off".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BackingStore for FlakyBackingStore {
    async fn get(&self, key: &str) -> BackingResult<Option<String>> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> BackingResult<()> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> BackingResult<()> {
        self.check()?;
        self.inner.remove(key).await
    }
}
