use serde::{Deserialize, Serialize};

/// Instruction sent to the model for a single selection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationPrompt {
    pub content: String,
    pub target_lang: String,
}

impl TranslationPrompt {
    pub fn new(content: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Please translate the following text into {lang}:\n\
             \"{text}\"\n\
             \n\
             Requirements:\n\
             - Only display the meaning of the text in {lang}\n\
             - For technical terms, keep the original word\n",
            lang = self.target_lang,
            text = self.content,
        )
    }
}
