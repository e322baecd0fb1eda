use crate::domain::error::{AppError, Result};
use crate::domain::language::DEFAULT_LANGUAGE;
use crate::domain::llm_config::LLMConfig;
use crate::domain::prompt::TranslationPrompt;
use crate::domain::selection::SelectedText;
use crate::domain::translation_config::{ConfigKey, TranslationConfig};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::storage::ConfigStore;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TranslateUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    store: Arc<dyn ConfigStore>,
    config: LLMConfig,
}

impl TranslateUseCase {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        store: Arc<dyn ConfigStore>,
        config: LLMConfig,
    ) -> Self {
        Self {
            llm_client,
            store,
            config,
        }
    }

    /// One translation attempt. Input and credential problems are reported
    /// before any request is made.
    pub async fn execute(&self, content: &str, api_key: &str) -> Result<String> {
        let selected = SelectedText::new(content)?;

        if api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey);
        }

        let target = self.target_language_name().await;
        debug!(
            chars = selected.char_count(),
            target = %target,
            "Requesting translation"
        );

        let prompt = TranslationPrompt::new(selected.as_str(), target).render();
        self.llm_client.generate(&self.config, api_key, &prompt).await
    }

    async fn target_language_name(&self) -> String {
        match self.store.get(&[ConfigKey::TargetLanguageName]).await {
            Ok(values) => TranslationConfig::from_values(&values).target_language_name,
            Err(err) => {
                warn!(error = %err, "Failed to read target language, using default");
                DEFAULT_LANGUAGE.name.to_string()
            }
        }
    }
}
