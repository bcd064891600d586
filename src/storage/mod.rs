pub mod backing;
pub mod codec;
pub mod file;
pub mod memory;

pub use backing::{BackingError, BackingResult, BackingStore};
pub use file::FileBackingStore;
pub use memory::InMemoryBackingStore;
