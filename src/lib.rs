pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

#[cfg(test)]
mod test_support;

pub use app::{bootstrap, init_tracing, Translator};
pub use application::{SaveSettingsRequest, SettingsSnapshot, SettingsUseCase, TranslateUseCase};
pub use domain::error::{AppError, Result};
pub use domain::message::BridgeMessage;
pub use infrastructure::config::AppSettings;
pub use interfaces::content::{
    ClickEvent, ContentScript, ContentScriptOptions, CycleOutcome, KeyEvent, Page,
};
