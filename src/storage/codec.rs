//! Namespace (de)serialization and the recovery rules that make every store
//! operation survive an unreliable medium.
//!
//! Read path: unavailability and malformed content both degrade to an empty
//! collection; malformed keys are purged so the broken parse is not
//! re-attempted. Write path: quota errors surface as the user-actionable
//! [`StoreError::StorageFull`], unavailability is logged and swallowed.

use super::backing::{BackingError, BackingStore};
use crate::core::{Entity, Result, StoreError};
use log::{debug, warn};
use serde_json::Value;

/// Loads one namespace's records. Never fails: callers of the read path see
/// an empty collection instead of parse or availability errors.
pub async fn load_namespace<T: Entity>(backing: &dyn BackingStore, namespace: &str) -> Vec<T> {
    let raw = match backing.get(namespace).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("Namespace '{}' unreadable, treating as empty: {}", namespace, err);
            return Vec::new();
        }
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!(
                "Namespace '{}' holds {} instead of an array, purging",
                namespace,
                json_kind(&other)
            );
            purge(backing, namespace).await;
            return Vec::new();
        }
        Err(err) => {
            warn!("Namespace '{}' holds malformed JSON, purging: {}", namespace, err);
            purge(backing, namespace).await;
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            // The array itself is well-formed, so the key stays; the next
            // full-array write persists the cleaned collection.
            Err(err) => warn!(
                "Skipping undecodable record in namespace '{}': {}",
                namespace, err
            ),
        }
    }
    records
}

/// Replaces one namespace's array. The write either lands whole or leaves
/// the previous content untouched.
pub async fn save_namespace<T: Entity>(
    backing: &dyn BackingStore,
    namespace: &str,
    records: &[T],
) -> Result<()> {
    let serialized = serde_json::to_string(records)?;

    match backing.set(namespace, &serialized).await {
        Ok(()) => Ok(()),
        Err(BackingError::QuotaExceeded) => Err(StoreError::StorageFull),
        Err(BackingError::Unavailable(reason)) => {
            warn!(
                "Dropped write to namespace '{}', backing store unavailable: {}",
                namespace, reason
            );
            Ok(())
        }
    }
}

async fn purge(backing: &dyn BackingStore, namespace: &str) {
    match backing.remove(namespace).await {
        Ok(()) => debug!("Purged corrupted namespace '{}'", namespace),
        Err(err) => warn!("Could not purge corrupted namespace '{}': {}", namespace, err),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
