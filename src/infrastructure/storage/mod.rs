//! Storage for uploaded image bytes

mod disk;
mod memory;
mod traits;

pub use disk::DiskImageStore;
pub use memory::InMemoryImageStore;
pub use traits::{ImageStore, StorageError};
