use crate::domain::error::{AppError, Result};
use crate::domain::language::{find_language, Language, DEFAULT_LANGUAGE};
use crate::domain::message::BridgeMessage;
use crate::domain::translation_config::{ConfigKey, ConfigValues, TranslationMode};
use crate::infrastructure::storage::ConfigStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// What the settings popup shows when it opens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsSnapshot {
    pub user_name: Option<String>,
    pub api_key: Option<String>,
    pub mode: TranslationMode,
    pub language: Language,
}

#[derive(Debug, Clone, Default)]
pub struct SaveSettingsRequest {
    pub user_name: String,
    pub api_key: String,
    pub mode: TranslationMode,
}

pub struct SettingsUseCase {
    store: Arc<dyn ConfigStore>,
}

impl SettingsUseCase {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<SettingsSnapshot> {
        let values = self.store.get(&ConfigKey::ALL).await?;
        let language = values
            .target_language
            .as_deref()
            .and_then(find_language)
            .unwrap_or(DEFAULT_LANGUAGE);

        Ok(SettingsSnapshot {
            user_name: values.user_name.filter(|name| !name.is_empty()),
            api_key: values.api_key.filter(|key| !key.is_empty()),
            mode: values.translation_mode.unwrap_or_default(),
            language,
        })
    }

    /// Persists the form and returns the message to forward to the page.
    ///
    /// The API key is only stored in custom-key mode, but the message always
    /// carries what was typed; the page ignores empty keys.
    pub async fn save(&self, request: SaveSettingsRequest) -> Result<BridgeMessage> {
        let user_name = request.user_name.trim();
        let api_key = request.api_key.trim();

        let mut values = ConfigValues {
            translation_mode: Some(request.mode),
            ..Default::default()
        };
        if !user_name.is_empty() {
            values.user_name = Some(user_name.to_string());
        }
        if request.mode == TranslationMode::CustomKey && !api_key.is_empty() {
            values.api_key = Some(api_key.to_string());
        }

        self.store.set(values).await?;
        info!(mode = %request.mode, "Settings saved");

        Ok(BridgeMessage::UpdateApiKey {
            api_key: api_key.to_string(),
        })
    }

    pub async fn set_mode(&self, mode: TranslationMode) -> Result<()> {
        self.store
            .set(ConfigValues {
                translation_mode: Some(mode),
                ..Default::default()
            })
            .await
    }

    pub async fn select_language(&self, code: &str) -> Result<Language> {
        let language = find_language(code).ok_or_else(|| {
            AppError::ValidationError(format!("Unsupported language: {}", code.trim()))
        })?;

        self.store
            .set(ConfigValues {
                target_language: Some(language.code.to_string()),
                target_language_name: Some(language.name.to_string()),
                ..Default::default()
            })
            .await?;
        info!(language = language.code, "Target language changed");

        Ok(language)
    }
}
