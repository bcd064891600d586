//! One-time population of named namespaces with reference data.
//!
//! Seeding is an explicit startup step: the host builds a [`SeedManager`],
//! registers its (namespace, records) pairs, and calls [`SeedManager::run`]
//! once. A sentinel key in the backing store marks a completed run; each
//! seed record's `code` additionally acts as an idempotency key so an
//! interrupted run (sentinel never set) resumes without duplicating the
//! namespaces it already populated.

use crate::core::{Entity, Result, StoreError};
use crate::storage::{BackingError, BackingStore};
use crate::store::{DEFAULT_ID_PREFIX, RecordStore};
use futures::future::BoxFuture;
use log::{debug, info, warn};
use std::sync::Arc;

/// Value the sentinel key holds after a completed run.
pub const SEED_SENTINEL_VALUE: &str = "true";

type SeedJob = Box<dyn Fn(Arc<dyn BackingStore>) -> BoxFuture<'static, Result<usize>> + Send + Sync>;

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The sentinel was already set; nothing was written.
    AlreadySeeded,
    /// Namespaces were populated and the sentinel was set.
    Seeded { namespaces: usize, records: usize },
}

/// Populates a fixed set of namespaces exactly once per backing-store
/// lifetime.
///
/// Not transactional: a persist failure mid-run leaves earlier namespaces
/// populated and the sentinel unset. The per-record `code` check makes the
/// following run skip what already landed instead of duplicating it.
pub struct SeedManager {
    backing: Arc<dyn BackingStore>,
    sentinel_key: String,
    id_prefix: String,
    jobs: Vec<SeedJob>,
}

impl SeedManager {
    pub fn new(backing: Arc<dyn BackingStore>, sentinel_key: impl Into<String>) -> Self {
        Self {
            backing,
            sentinel_key: sentinel_key.into(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            jobs: Vec::new(),
        }
    }

    /// Id prefix handed to the record stores the seeder creates through.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Registers one namespace and the reference records it starts with.
    pub fn register<T: Entity + 'static>(
        mut self,
        namespace: impl Into<String>,
        records: Vec<T>,
    ) -> Self {
        let namespace = namespace.into();
        let id_prefix = self.id_prefix.clone();

        self.jobs.push(Box::new(move |backing| {
            let namespace = namespace.clone();
            let id_prefix = id_prefix.clone();
            let records = records.clone();

            Box::pin(async move {
                let store =
                    RecordStore::<T>::new(backing, namespace).with_id_prefix(id_prefix);
                let existing = store.get_all().await;

                let mut created = 0usize;
                for record in records {
                    if existing.iter().any(|present| present.code() == record.code()) {
                        debug!(
                            "Seed record '{}' already present in '{}', skipping",
                            record.code(),
                            store.namespace()
                        );
                        continue;
                    }
                    store.create(record).await?;
                    created += 1;
                }
                Ok(created)
            })
        }));
        self
    }

    /// Whether the sentinel flag reports a completed run.
    pub async fn has_run(&self) -> bool {
        match self.backing.get(&self.sentinel_key).await {
            Ok(Some(flag)) => flag == SEED_SENTINEL_VALUE,
            Ok(None) => false,
            Err(err) => {
                warn!("Could not read seed sentinel '{}': {}", self.sentinel_key, err);
                false
            }
        }
    }

    /// Seeds every registered namespace, then sets the sentinel.
    pub async fn run(&self) -> Result<SeedOutcome> {
        if self.has_run().await {
            info!("Seed sentinel '{}' is set, skipping seeding", self.sentinel_key);
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut records = 0usize;
        for job in &self.jobs {
            records += job(self.backing.clone()).await?;
        }

        match self.backing.set(&self.sentinel_key, SEED_SENTINEL_VALUE).await {
            Ok(()) => {}
            Err(BackingError::QuotaExceeded) => return Err(StoreError::StorageFull),
            Err(BackingError::Unavailable(reason)) => warn!(
                "Seed sentinel '{}' not persisted, backing store unavailable: {}",
                self.sentinel_key, reason
            ),
        }

        info!(
            "Seeded {} records across {} namespaces",
            records,
            self.jobs.len()
        );
        Ok(SeedOutcome::Seeded {
            namespaces: self.jobs.len(),
            records,
        })
    }
}
