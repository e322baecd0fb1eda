pub mod error;
pub mod language;
pub mod llm_config;
pub mod message;
pub mod popup;
pub mod prompt;
pub mod selection;
pub mod translation_config;
