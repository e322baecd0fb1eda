use crate::domain::error::Result;
use serde::{Deserialize, Serialize};

/// Out-of-band messages sent from the settings popup to the page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BridgeMessage {
    UpdateApiKey {
        #[serde(rename = "apiKey")]
        api_key: String,
    },
}

impl BridgeMessage {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
