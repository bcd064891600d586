use super::backing::{BackingError, BackingResult, BackingStore};
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Backing store persisted as a single JSON object file mapping keys to
/// values.
///
/// Every mutation rewrites the whole file through a temp file followed by a
/// rename, so a crash mid-write leaves the previous file intact. A corrupted
/// file opens as empty with a logged warning, matching the namespace-level
/// recovery policy.
pub struct FileBackingStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
    max_bytes: Option<usize>,
}

impl FileBackingStore {
    pub fn open(path: impl AsRef<Path>) -> BackingResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BackingError::Unavailable(format!(
                    "failed to create store directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                BackingError::Unavailable(format!("failed to read '{}': {}", path.display(), e))
            })?;
            match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        "Store file '{}' is corrupted, starting empty: {}",
                        path.display(),
                        err
                    );
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
            max_bytes: None,
        })
    }

    /// Rejects writes once keys plus values exceed `max_bytes`.
    pub fn with_capacity_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn usage(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(key, value)| key.len() + value.len()).sum()
    }

    fn flush(&self, entries: &HashMap<String, String>) -> BackingResult<()> {
        let serialized = serde_json::to_string(entries).map_err(|e| {
            BackingError::Unavailable(format!("failed to serialize store file: {}", e))
        })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            BackingError::Unavailable(format!("failed to create temp file: {}", e))
        })?;
        temp.write_all(serialized.as_bytes())
            .map_err(|e| BackingError::Unavailable(format!("failed to write store file: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| BackingError::Unavailable(format!("failed to sync store file: {}", e)))?;
        temp.persist(&self.path).map_err(|e| {
            BackingError::Unavailable(format!(
                "failed to replace '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

#[async_trait]
impl BackingStore for FileBackingStore {
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

        // Flush first, commit to memory second: a failed flush must not
        // leave the in-memory view ahead of the file.
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> BackingResult<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}
