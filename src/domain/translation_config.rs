use crate::domain::language::DEFAULT_LANGUAGE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::AppError;

/// Where the API key comes from, as chosen in the settings popup.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationMode {
    #[default]
    Free,
    CustomKey,
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationMode::Free => write!(f, "free"),
            TranslationMode::CustomKey => write!(f, "custom-key"),
        }
    }
}

impl FromStr for TranslationMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(TranslationMode::Free),
            "custom-key" | "custom_key" | "custom" => Ok(TranslationMode::CustomKey),
            other => Err(AppError::ValidationError(format!(
                "Unknown translation mode: {other}"
            ))),
        }
    }
}

/// Keys understood by the configuration store.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    #[serde(rename = "apiKey")]
    ApiKey,
    #[serde(rename = "targetLanguage")]
    TargetLanguage,
    #[serde(rename = "targetLanguageName")]
    TargetLanguageName,
    #[serde(rename = "translationMode")]
    TranslationMode,
    #[serde(rename = "userName")]
    UserName,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::ApiKey,
        ConfigKey::TargetLanguage,
        ConfigKey::TargetLanguageName,
        ConfigKey::TranslationMode,
        ConfigKey::UserName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "apiKey",
            ConfigKey::TargetLanguage => "targetLanguage",
            ConfigKey::TargetLanguageName => "targetLanguageName",
            ConfigKey::TranslationMode => "translationMode",
            ConfigKey::UserName => "userName",
        }
    }
}

/// Sparse set of stored values; `None` means unset or not requested.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_mode: Option<TranslationMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl ConfigValues {
    /// Copy of `self` holding only the requested keys.
    pub fn select(&self, keys: &[ConfigKey]) -> Self {
        let mut out = ConfigValues::default();
        for key in keys {
            match key {
                ConfigKey::ApiKey => out.api_key = self.api_key.clone(),
                ConfigKey::TargetLanguage => out.target_language = self.target_language.clone(),
                ConfigKey::TargetLanguageName => {
                    out.target_language_name = self.target_language_name.clone()
                }
                ConfigKey::TranslationMode => out.translation_mode = self.translation_mode,
                ConfigKey::UserName => out.user_name = self.user_name.clone(),
            }
        }
        out
    }

    /// Overwrites every field that is set in `other`.
    pub fn merge(&mut self, other: ConfigValues) {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.target_language.is_some() {
            self.target_language = other.target_language;
        }
        if other.target_language_name.is_some() {
            self.target_language_name = other.target_language_name;
        }
        if other.translation_mode.is_some() {
            self.translation_mode = other.translation_mode;
        }
        if other.user_name.is_some() {
            self.user_name = other.user_name;
        }
    }
}

/// In-memory copy of the values the content script needs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    pub api_key: String,
    pub target_language_name: String,
    pub mode: TranslationMode,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            target_language_name: DEFAULT_LANGUAGE.name.to_string(),
            mode: TranslationMode::default(),
        }
    }
}

impl TranslationConfig {
    pub fn from_values(values: &ConfigValues) -> Self {
        let target_language_name = values
            .target_language_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE.name)
            .to_string();

        Self {
            api_key: values.api_key.clone().unwrap_or_default(),
            target_language_name,
            mode: values.translation_mode.unwrap_or_default(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
