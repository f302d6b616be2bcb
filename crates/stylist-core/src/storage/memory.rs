use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::StylistError;

/// Process-local store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StylistError> {
        self.entries
            .lock()
            .map_err(|_| StylistError::Storage("memory store lock poisoned".into()))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StylistError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StylistError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
