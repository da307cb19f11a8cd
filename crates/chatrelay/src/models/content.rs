use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One element of a part list content
///
/// Only bare strings and `image_url` parts are understood. Every other shape,
/// including `{"type": "text"}` objects, lands in `Unknown` and is forwarded as is.
/// Image parts keep the object they were read from, so unread fields survive a passthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ContentPart {
    Text(String),
    ImageUrl { url: String, raw: Value },
    Unknown(Value),
}

impl From<Value> for ContentPart {
    fn from(value: Value) -> Self {
        if let Value::String(text) = value {
            return ContentPart::Text(text);
        }

        let url = match value.get("type").and_then(Value::as_str) {
            Some("image_url") => value
                .get("image_url")
                .and_then(|image| image.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        match url {
            Some(url) => ContentPart::ImageUrl { url, raw: value },
            None => ContentPart::Unknown(value),
        }
    }
}

impl From<ContentPart> for Value {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => Value::String(text),
            ContentPart::ImageUrl { raw, .. } => raw,
            ContentPart::Unknown(value) => value,
        }
    }
}

impl ContentPart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentPart::Text(text.into())
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        let url = url.into();
        let raw = json!({"type": "image_url", "image_url": {"url": url}});
        ContentPart::ImageUrl { url, raw }
    }

    /// Get the url if this is an image reference with a non-empty url
    pub fn as_image_url(&self) -> Option<&str> {
        match self {
            ContentPart::ImageUrl { url, .. } if !url.is_empty() => Some(url),
            _ => None,
        }
    }

    /// Get the text if this part carries plain text, either bare or as a text object
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(text) => Some(text),
            ContentPart::Unknown(value) if value.get("type").and_then(Value::as_str) == Some("text") => {
                value.get("text").and_then(Value::as_str)
            }
            _ => None,
        }
    }
}
