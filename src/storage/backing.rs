//! Contract of the flat key-value medium every namespace serializes into.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackingError {
    #[error("Backing store capacity exceeded")]
    QuotaExceeded,

    #[error("Backing store unavailable: {0}")]
    Unavailable(String),
}

pub type BackingResult<T> = std::result::Result<T, BackingError>;

/// A process-local, string-keyed, string-valued store with finite capacity
/// and no atomic multi-key operations.
///
/// The medium itself is not guaranteed to exist; implementations report an
/// absent or broken medium as [`BackingError::Unavailable`] and a full one as
/// [`BackingError::QuotaExceeded`]. The recovery policy for both lives one
/// layer up, in [`codec`](super::codec); implementations just report.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> BackingResult<Option<String>>;

    /// Fully replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> BackingResult<()>;

    /// Removes `key`; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> BackingResult<()>;
}
