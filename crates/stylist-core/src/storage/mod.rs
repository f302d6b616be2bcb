//! String-keyed, string-valued durable storage.

mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use crate::error::StylistError;

/// The persistence layer conversations are written to.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing has been stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StylistError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StylistError>;
}
