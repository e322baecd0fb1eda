pub mod use_cases;

pub use use_cases::settings::{SaveSettingsRequest, SettingsSnapshot, SettingsUseCase};
pub use use_cases::translate::TranslateUseCase;
