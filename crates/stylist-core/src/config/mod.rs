use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{defaults, models, paths, prompts};
use crate::conversation::RequestBuilder;
use crate::error::StylistError;
use crate::llm::OpenAIClient;
use crate::storage::{FileKeyValueStore, KeyValueStore};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub system_prompt: String,
    pub image_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub conversation_key: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: models::DEFAULT_MODEL.to_string(),
            api_key_env: defaults::API_KEY_ENV.to_string(),
            base_url: None,
            max_tokens: defaults::MAX_TOKENS,
            system_prompt: prompts::SYSTEM.to_string(),
            image_prompt: prompts::IMAGE_ONLY.to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            conversation_key: defaults::CONVERSATION_KEY.to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring invalid config {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Could not read config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), StylistError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StylistError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StylistError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the API key from the environment variable named in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.assistant.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Build the completion client from the current settings.
    pub fn build_client(&self) -> Result<OpenAIClient, StylistError> {
        let api_key = self.api_key().ok_or_else(|| {
            StylistError::Config(format!(
                "No API key: set the {} environment variable",
                self.assistant.api_key_env
            ))
        })?;

        let mut client = OpenAIClient::new(api_key)
            .with_model(&self.assistant.model)
            .with_max_tokens(self.assistant.max_tokens);
        if let Some(ref base_url) = self.assistant.base_url {
            client = client.with_base_url(base_url);
        }
        Ok(client)
    }

    pub fn request_builder(&self) -> RequestBuilder {
        RequestBuilder::new()
            .with_system_prompt(&self.assistant.system_prompt)
            .with_image_prompt(&self.assistant.image_prompt)
    }

    /// Directory holding persisted conversations.
    pub fn store_dir(&self) -> Result<PathBuf, StylistError> {
        match self.storage.data_dir {
            Some(ref dir) => Ok(dir.join(paths::STORE_DIR)),
            None => dirs::data_dir()
                .map(|dir| dir.join(paths::CONFIG_DIR).join(paths::STORE_DIR))
                .ok_or_else(|| {
                    StylistError::Config("Could not determine data directory".to_string())
                }),
        }
    }

    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, StylistError> {
        Ok(Arc::new(FileKeyValueStore::with_dir(self.store_dir()?)?))
    }
}
