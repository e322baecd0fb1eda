use crate::domain::error::Result;
use crate::domain::llm_config::{LLMConfig, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::domain::selection::DEFAULT_ANCHOR_OFFSET;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "translator.toml";
pub const ENV_PREFIX: &str = "TRANSLATOR_";
pub const KEYRING_SERVICE: &str = "SelectionTranslator";

/// Process-level settings. User preferences (key, language, mode) live in the
/// configuration store instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub api_base_url: String,
    pub model: String,
    pub shortcut: String,
    pub anchor_offset: f64,
    pub request_timeout_secs: Option<u64>,
    pub store_path: Option<PathBuf>,
    pub use_keyring: bool,
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            shortcut: "Ctrl+Shift".to_string(),
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
            request_timeout_secs: None,
            store_path: None,
            use_keyring: false,
            log_filter: "info".to_string(),
        }
    }
}

impl AppSettings {
    /// Defaults, then `translator.toml` in the working directory, then
    /// `TRANSLATOR_*` environment variables.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self::figment(path).extract()?)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppSettings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            base_url: self.api_base_url.clone(),
            model: self.model.clone(),
            timeout_secs: self.request_timeout_secs,
            ..LLMConfig::default()
        }
    }
}
