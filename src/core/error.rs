use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record '{0}' not found in namespace '{1}'")]
    NotFound(String, String),

    #[error("Storage is full, clear data and retry")]
    StorageFull,

    #[error("Patch does not fit the record type: {0}")]
    InvalidPatch(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
