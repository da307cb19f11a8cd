use super::message::Message;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ChatSettings {
    pub fn new<S: Into<String>>(model: S) -> Self {
        Self {
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The caller's temperature, or the default when none was given. Zero is a valid choice.
    pub fn resolved_temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Inbound request body of the chat route
pub struct ChatRequest {
    pub chat_settings: ChatSettings,
    #[serde(default)]
    pub messages: Vec<Message>,
}
