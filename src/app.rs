use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::application::{SaveSettingsRequest, SettingsUseCase, TranslateUseCase};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::{AppSettings, KEYRING_SERVICE};
use crate::infrastructure::llm_clients::GeminiClient;
use crate::infrastructure::security::keyring::KeyringManager;
use crate::infrastructure::storage::{ConfigStore, FileConfigStore, MemoryConfigStore};
use crate::interfaces::bridge::{channel, spawn_bridge_listener, BridgeSender};
use crate::interfaces::content::{ContentScript, ContentScriptOptions, Page};
use crate::interfaces::shortcuts::Shortcut;

pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// A wired content script plus the settings side that feeds it.
pub struct Translator<P: Page + 'static> {
    pub script: Arc<ContentScript<P>>,
    pub settings: SettingsUseCase,
    bridge: BridgeSender,
    listener: JoinHandle<()>,
}

impl<P: Page + 'static> Translator<P> {
    pub fn bridge(&self) -> BridgeSender {
        self.bridge.clone()
    }

    /// Saves the settings form and forwards the key update to the page.
    pub async fn save_settings(&self, request: SaveSettingsRequest) -> Result<()> {
        let message = self.settings.save(request).await?;
        self.bridge
            .send(message)
            .map_err(|e| AppError::Internal(format!("Bridge closed: {}", e)))
    }

    pub fn shutdown(self) {
        self.script.cleanup();
        self.listener.abort();
    }
}

fn build_store(settings: &AppSettings) -> Arc<dyn ConfigStore> {
    match &settings.store_path {
        Some(path) => {
            let mut store = FileConfigStore::new(path);
            if settings.use_keyring {
                store = store.with_keyring(KeyringManager::new(KEYRING_SERVICE));
            }
            info!(
                path = %path.display(),
                keyring = settings.use_keyring,
                "Using file config store"
            );
            Arc::new(store)
        }
        None => Arc::new(MemoryConfigStore::default()),
    }
}

/// Wires logging, the store, provider client and content script for `page`.
///
/// Must be called from within a tokio runtime.
pub async fn bootstrap<P: Page + 'static>(
    page: P,
    settings: &AppSettings,
) -> Result<Translator<P>> {
    init_tracing(&settings.log_filter);

    let shortcut: Shortcut = settings.shortcut.parse().map_err(|err| {
        error!(error = %err, shortcut = %settings.shortcut, "Invalid shortcut");
        err
    })?;

    let store = build_store(settings);
    let translate = TranslateUseCase::new(
        Arc::new(GeminiClient::new()),
        store.clone(),
        settings.llm_config(),
    );
    let options = ContentScriptOptions {
        shortcut,
        anchor_offset: settings.anchor_offset,
        ..ContentScriptOptions::default()
    };
    let script = Arc::new(ContentScript::new(page, translate, store.clone(), options));
    script.initialize().await?;

    let (bridge, receiver) = channel();
    let listener = spawn_bridge_listener(script.clone(), receiver);

    Ok(Translator {
        script,
        settings: SettingsUseCase::new(store),
        bridge,
        listener,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::BridgeMessage;
    use crate::domain::translation_config::TranslationMode;
    use crate::interfaces::content::ListenerKind;
    use crate::test_support::FakePage;

    async fn wait_for_key(translator: &Translator<FakePage>, expected: &str) {
        for _ in 0..1000 {
            if translator.script.config().api_key == expected {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("API key never became {expected}");
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_bad_shortcut() {
        let settings = AppSettings {
            shortcut: "Hyper+Q+Z".to_string(),
            ..AppSettings::default()
        };
        let result = bootstrap(FakePage::new(800.0, 600.0), &settings).await;
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_saved_key_reaches_running_script() {
        let translator = bootstrap(FakePage::new(800.0, 600.0), &AppSettings::default())
            .await
            .unwrap();
        assert!(!translator.script.config().has_api_key());

        translator
            .save_settings(SaveSettingsRequest {
                user_name: "An".into(),
                api_key: "fresh-key".into(),
                mode: TranslationMode::CustomKey,
            })
            .await
            .unwrap();
        wait_for_key(&translator, "fresh-key").await;

        translator.shutdown();
    }

    #[tokio::test]
    async fn test_bridge_sender_updates_script() {
        let translator = bootstrap(FakePage::new(800.0, 600.0), &AppSettings::default())
            .await
            .unwrap();
        translator
            .bridge()
            .send(BridgeMessage::UpdateApiKey {
                api_key: "from-options".into(),
            })
            .unwrap();
        wait_for_key(&translator, "from-options").await;
        translator.shutdown();
    }

    #[tokio::test]
    async fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            store_path: Some(dir.path().join("settings.json")),
            ..AppSettings::default()
        };

        let first = bootstrap(FakePage::new(800.0, 600.0), &settings)
            .await
            .unwrap();
        first
            .save_settings(SaveSettingsRequest {
                api_key: "persisted".into(),
                mode: TranslationMode::CustomKey,
                ..SaveSettingsRequest::default()
            })
            .await
            .unwrap();
        first.settings.select_language("fr").await.unwrap();
        first.shutdown();

        let second = bootstrap(FakePage::new(800.0, 600.0), &settings)
            .await
            .unwrap();
        let config = second.script.config();
        assert_eq!(config.api_key, "persisted");
        assert_eq!(config.target_language_name, "French");
        assert_eq!(config.mode, TranslationMode::CustomKey);
        second.script.with_page(|page| {
            assert_eq!(page.listener_count(ListenerKind::KeyDown), 1);
        });
    }
}
