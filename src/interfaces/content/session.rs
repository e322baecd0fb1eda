use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::page::{ClickEvent, KeyEvent, ListenerKind, Page};
use super::popup::PopupController;
use super::selection_tracker::SelectionTracker;
use crate::application::TranslateUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::message::BridgeMessage;
use crate::domain::popup::{
    OverlayStyle, PopupMode, PopupState, EMPTY_SELECTION_MESSAGE, MISSING_API_KEY_MESSAGE,
    TOO_LONG_MESSAGE, TRANSLATION_FAILED_MESSAGE,
};
use crate::domain::selection::{SelectedText, SelectionAnchor, DEFAULT_ANCHOR_OFFSET};
use crate::domain::translation_config::{ConfigKey, TranslationConfig};
use crate::infrastructure::storage::ConfigStore;
use crate::interfaces::shortcuts::Shortcut;

#[derive(Debug, Clone)]
pub struct ContentScriptOptions {
    pub shortcut: Shortcut,
    pub anchor_offset: f64,
    pub style: OverlayStyle,
}

impl Default for ContentScriptOptions {
    fn default() -> Self {
        Self {
            shortcut: Shortcut::default(),
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
            style: OverlayStyle::default(),
        }
    }
}

/// User-facing explanation for errors caused by input or configuration.
fn rejection_message(err: &AppError) -> Option<&'static str> {
    match err {
        AppError::EmptySelection => Some(EMPTY_SELECTION_MESSAGE),
        AppError::SelectionTooLong { .. } => Some(TOO_LONG_MESSAGE),
        AppError::MissingApiKey => Some(MISSING_API_KEY_MESSAGE),
        _ => None,
    }
}

/// How a triggered cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Translated(String),
    /// Input or credential problem; the explanation is in the popup.
    Rejected(AppError),
    /// Provider or transport failure; the popup shows the generic message.
    Failed(AppError),
    /// A newer trigger (or cleanup) happened while the request was in flight.
    Superseded,
}

struct PendingCycle {
    generation: u64,
    text: String,
    anchor: SelectionAnchor,
    api_key: String,
}

struct SessionState<P> {
    page: P,
    tracker: SelectionTracker,
    popup: PopupController,
    config: TranslationConfig,
    generation: u64,
    active: bool,
}

/// Per-page controller tying selection, shortcut, popup and translation
/// together.
///
/// Event handlers take `&self`; state sits behind one mutex that is never
/// held across the network call, so cycles may overlap. Each cycle is
/// stamped with a generation and only the latest one may update the popup.
pub struct ContentScript<P: Page> {
    session_id: Uuid,
    shortcut: Shortcut,
    translate: TranslateUseCase,
    store: Arc<dyn ConfigStore>,
    state: Mutex<SessionState<P>>,
}

impl<P: Page> ContentScript<P> {
    pub fn new(
        page: P,
        translate: TranslateUseCase,
        store: Arc<dyn ConfigStore>,
        options: ContentScriptOptions,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            shortcut: options.shortcut,
            translate,
            store,
            state: Mutex::new(SessionState {
                page,
                tracker: SelectionTracker::new(options.anchor_offset),
                popup: PopupController::new(options.style),
                config: TranslationConfig::default(),
                generation: 0,
                active: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Installs the pointer/key listeners and loads the cached configuration.
    pub async fn initialize(&self) -> Result<()> {
        {
            let mut state = self.lock();
            for kind in [ListenerKind::PointerUp, ListenerKind::KeyDown] {
                state.page.remove_listener(kind);
                state.page.add_listener(kind);
            }
            state.active = true;
        }
        info!(session = %self.session_id, shortcut = %self.shortcut, "Content script initialized");
        self.refresh_config().await
    }

    pub async fn refresh_config(&self) -> Result<()> {
        let values = self
            .store
            .get(&[
                ConfigKey::ApiKey,
                ConfigKey::TargetLanguageName,
                ConfigKey::TranslationMode,
            ])
            .await
            .map_err(|err| {
                error!(session = %self.session_id, error = %err, "Failed to load configuration");
                err
            })?;

        self.lock().config = TranslationConfig::from_values(&values);
        Ok(())
    }

    pub fn config(&self) -> TranslationConfig {
        self.lock().config.clone()
    }

    pub fn popup_state(&self) -> PopupState {
        self.lock().popup.state().clone()
    }

    pub fn selected_text(&self) -> Option<String> {
        self.lock().tracker.selected_text().map(str::to_string)
    }

    /// Read access to the host page.
    pub fn with_page<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.lock().page)
    }

    pub fn on_pointer_up(&self) {
        let mut guard = self.lock();
        let state = &mut *guard;
        if !state.active {
            return;
        }
        if state.tracker.on_pointer_up(&state.page) {
            debug!(
                session = %self.session_id,
                anchor = ?state.tracker.anchor(),
                "Selection updated"
            );
        }
    }

    pub fn on_click(&self, event: ClickEvent) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.popup.handle_click(&mut state.page, event.position)
    }

    /// Runs a full cycle when `event` is the trigger. `None` means the key
    /// press was ignored.
    pub async fn on_key_down(&self, event: &KeyEvent) -> Option<CycleOutcome> {
        let cycle = match self.begin_cycle(event)? {
            Ok(cycle) => cycle,
            Err(outcome) => return Some(outcome),
        };

        info!(
            session = %self.session_id,
            generation = cycle.generation,
            "Translation cycle started"
        );
        let result = self.translate.execute(&cycle.text, &cycle.api_key).await;
        Some(self.finish_cycle(cycle, result))
    }

    fn begin_cycle(
        &self,
        event: &KeyEvent,
    ) -> Option<std::result::Result<PendingCycle, CycleOutcome>> {
        if !self.shortcut.matches(event) {
            return None;
        }

        let mut guard = self.lock();
        let state = &mut *guard;
        if !state.active {
            return None;
        }

        let live = state.page.selection().map(|s| s.text).unwrap_or_default();
        let anchor = state.tracker.anchor();
        match SelectedText::new(&live) {
            Ok(_) => {}
            Err(AppError::EmptySelection) => return None,
            Err(err) => {
                warn!(session = %self.session_id, error = %err, "Selection rejected");
                state.generation += 1;
                state.popup.show(&mut state.page, TOO_LONG_MESSAGE, anchor, PopupMode::Error);
                return Some(Err(CycleOutcome::Rejected(err)));
            }
        }

        let text = state.tracker.selected_text()?.to_string();

        state.generation += 1;
        state.popup.remove(&mut state.page);
        state.popup.show_loading(&mut state.page, anchor);

        Some(Ok(PendingCycle {
            generation: state.generation,
            text,
            anchor,
            api_key: state.config.api_key.clone(),
        }))
    }

    fn finish_cycle(&self, cycle: PendingCycle, result: Result<String>) -> CycleOutcome {
        let mut guard = self.lock();
        let state = &mut *guard;

        if !state.active || state.generation != cycle.generation {
            debug!(
                session = %self.session_id,
                generation = cycle.generation,
                current = state.generation,
                "Discarding superseded translation"
            );
            return CycleOutcome::Superseded;
        }

        let (message, mode, outcome) = match result {
            Ok(translated) => (
                translated.clone(),
                PopupMode::Result,
                CycleOutcome::Translated(translated),
            ),
            Err(err) => match rejection_message(&err) {
                Some(message) => (
                    message.to_string(),
                    PopupMode::Error,
                    CycleOutcome::Rejected(err),
                ),
                None => {
                    error!(session = %self.session_id, error = %err, "Translation API failed");
                    (
                        TRANSLATION_FAILED_MESSAGE.to_string(),
                        PopupMode::Error,
                        CycleOutcome::Failed(err),
                    )
                }
            },
        };

        state.popup.show(&mut state.page, &message, cycle.anchor, mode);
        outcome
    }

    pub fn on_message(&self, message: BridgeMessage) {
        match message {
            BridgeMessage::UpdateApiKey { api_key } => {
                if api_key.trim().is_empty() {
                    debug!(session = %self.session_id, "Ignoring empty API key update");
                    return;
                }
                self.lock().config.api_key = api_key;
                info!(session = %self.session_id, "API key updated");
            }
        }
    }

    /// Raw JSON entry point for hosts; unknown messages are ignored.
    pub fn handle_raw_message(&self, raw: &str) {
        match BridgeMessage::from_json(raw) {
            Ok(message) => self.on_message(message),
            Err(err) => debug!(session = %self.session_id, error = %err, "Ignoring message"),
        }
    }

    /// Tears down listeners and the popup. In-flight cycles are discarded.
    pub fn cleanup(&self) {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.page.remove_listener(ListenerKind::PointerUp);
        state.page.remove_listener(ListenerKind::KeyDown);
        state.popup.remove(&mut state.page);
        state.tracker.clear();
        state.generation += 1;
        state.active = false;
        info!(session = %self.session_id, "Content script cleaned up");
    }
}
