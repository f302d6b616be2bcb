use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StylistError;

/// Stores each key as its own JSON file under a base directory.
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Result<Self, StylistError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            StylistError::Storage(format!(
                "Failed to create store directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Keys are percent-encoded so any key maps to a single flat file name.
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StylistError> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StylistError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StylistError> {
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, value).await.map_err(|e| {
            StylistError::Storage(format!("Failed to write temporary file: {}", e))
        })?;

        tokio::fs::rename(&tmp_path, &path).await.map_err(|e| {
            StylistError::Storage(format!("Failed to rename {}: {}", tmp_path.display(), e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_dir(dir.path()).unwrap();
        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_dir(dir.path()).unwrap();

        store.set("clothingCareMessages", "[]").await.unwrap();
        store.set("clothingCareMessages", "[1]").await.unwrap();

        assert_eq!(
            store.get("clothingCareMessages").await.unwrap().as_deref(),
            Some("[1]")
        );
        assert!(!dir.path().join("clothingCareMessages.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_keys_with_separators_stay_inside_base_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_dir(dir.path()).unwrap();

        store.set("../escape/attempt", "x").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.get("../escape/attempt").await.unwrap().as_deref(), Some("x"));
    }
}
