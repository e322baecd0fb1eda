//! Configuration store backends.
//!
//! The content script only reads through [`ConfigStore`]; the settings use
//! case writes through it. Two backends ship with the crate:
//! - [`MemoryConfigStore`] for hosts that already own persistence
//! - [`FileConfigStore`], a JSON document on disk that can keep the API key
//!   in the OS keychain instead of the file

use crate::domain::error::{AppError, Result};
use crate::domain::translation_config::{ConfigKey, ConfigValues};
use crate::infrastructure::security::keyring::KeyringManager;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, keys: &[ConfigKey]) -> Result<ConfigValues>;
    async fn set(&self, values: ConfigValues) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: RwLock<ConfigValues>,
}

impl MemoryConfigStore {
    pub fn new(values: ConfigValues) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, keys: &[ConfigKey]) -> Result<ConfigValues> {
        Ok(self.values.read().await.select(keys))
    }

    async fn set(&self, values: ConfigValues) -> Result<()> {
        self.values.write().await.merge(values);
        Ok(())
    }
}

pub struct FileConfigStore {
    path: PathBuf,
    keyring: Option<KeyringManager>,
    write_lock: Mutex<()>,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keyring: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Keep the API key in the OS keychain rather than in the JSON file.
    pub fn with_keyring(mut self, keyring: KeyringManager) -> Self {
        self.keyring = Some(keyring);
        self
    }

    async fn read_document(&self) -> Result<ConfigValues> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(ConfigValues::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Config file not found, using defaults");
                Ok(ConfigValues::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_document(&self, values: &ConfigValues) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, serde_json::to_vec_pretty(values)?).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

/// Runs a keychain call off the async worker; platform credential stores block.
async fn keychain<T, F>(keyring: &KeyringManager, call: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&KeyringManager) -> Result<T> + Send + 'static,
{
    let keyring = keyring.clone();
    tokio::task::spawn_blocking(move || call(&keyring))
        .await
        .map_err(|e| AppError::Internal(format!("Keychain task failed: {}", e)))?
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get(&self, keys: &[ConfigKey]) -> Result<ConfigValues> {
        let mut values = self.read_document().await?;

        if let Some(keyring) = &self.keyring {
            if keys.contains(&ConfigKey::ApiKey) {
                let secret = keychain(keyring, |k| k.get_secret(ConfigKey::ApiKey.as_str())).await;
                match secret {
                    Ok(Some(secret)) => values.api_key = Some(secret),
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "Failed to read API key from keyring"),
                }
            }
        }

        Ok(values.select(keys))
    }

    async fn set(&self, mut values: ConfigValues) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Some(keyring) = &self.keyring {
            if let Some(api_key) = values.api_key.take() {
                let name = ConfigKey::ApiKey.as_str();
                if api_key.is_empty() {
                    keychain(keyring, move |k| k.delete_secret(name)).await?;
                } else {
                    keychain(keyring, move |k| k.set_secret(name, &api_key)).await?;
                }
            }
        }

        let mut document = self.read_document().await?;
        document.merge(values);
        self.write_document(&document).await
    }
}
