use super::content::ContentPart;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// Message content is either a plain string or an ordered list of parts
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Normalize into a part list, a plain string becomes a single text part
    pub fn into_parts(self) -> Vec<ContentPart> {
        match self {
            MessageContent::Text(text) => vec![ContentPart::Text(text)],
            MessageContent::Parts(parts) => parts,
        }
    }

    /// Flatten to plain text, joining the text parts of a part list with newlines
    pub fn to_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A message from the caller's conversation
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl Message {
    pub fn new<S: Into<String>>(role: S, content: MessageContent) -> Self {
        Message {
            role: role.into(),
            content: Some(content),
        }
    }

    pub fn system<S: Into<String>>(text: S) -> Self {
        Self::new("system", MessageContent::Text(text.into()))
    }

    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new("user", MessageContent::Text(text.into()))
    }

    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self::new("assistant", MessageContent::Text(text.into()))
    }

    /// Create a message with part list content
    pub fn with_parts<S: Into<String>>(role: S, parts: Vec<ContentPart>) -> Self {
        Self::new(role, MessageContent::Parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_content_normalizes_to_single_part() {
        let content = MessageContent::Text("hello".to_string());
        assert_eq!(content.into_parts(), vec![ContentPart::text("hello")]);
    }

    #[test]
    fn test_null_and_missing_content() {
        let missing: Message = serde_json::from_value(json!({"role": "user"})).unwrap();
        let null: Message =
            serde_json::from_value(json!({"role": "user", "content": null})).unwrap();
        assert_eq!(missing.content, None);
        assert_eq!(null.content, None);
    }

    #[test]
    fn test_to_text_joins_text_parts() {
        let message: Message = serde_json::from_value(json!({
            "role": "system",
            "content": [
                "Be brief.",
                {"type": "image_url", "image_url": {"url": "data:image/png;base64,AA"}},
                {"type": "text", "text": "Answer in French."}
            ]
        }))
        .unwrap();

        assert_eq!(
            message.content.unwrap().to_text(),
            "Be brief.\nAnswer in French."
        );
    }
}
