use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    Base64 { media_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Content blocks the relay produces itself
pub enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// A content entry of an anthropic message, either built here or forwarded from the caller
pub enum MessagePart {
    Block(ContentBlock),
    Passthrough(Value),
}

impl MessagePart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        MessagePart::Block(ContentBlock::Text { text: text.into() })
    }

    pub fn image<S: Into<String>, T: Into<String>>(media_type: S, data: T) -> Self {
        MessagePart::Block(ContentBlock::Image {
            source: ImageSource::Base64 {
                media_type: media_type.into(),
                data: data.into(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: Vec<MessagePart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of a streaming `POST /v1/messages` call
pub struct ProviderRequest {
    pub model: String,
    pub messages: Vec<AnthropicMessage>,
    pub temperature: f32,
    pub system: String,
    pub max_tokens: u32,
    pub stream: bool,
}
