pub mod error;
pub mod record;
pub mod types;

pub use error::{Result, StoreError};
pub use record::{Entity, EntityBase};
pub use types::{DEFAULT_PAGE_SIZE, ListQuery, RecordPage};
