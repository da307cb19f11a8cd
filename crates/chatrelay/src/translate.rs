//! Conversion of a generic conversation into an anthropic streaming request
use crate::limits::{resolve_max_tokens, ModelLimits};
use crate::models::chat::ChatSettings;
use crate::models::content::ContentPart;
use crate::models::message::Message;
use crate::providers::types::{AnthropicMessage, MessagePart, ProviderRequest};
use crate::providers::utils::{base64_from_data_url, media_type_from_data_url};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Build the provider request for a conversation
///
/// The first message is the system instruction and is never sent as a turn. This never fails:
/// content it does not understand is forwarded as is and left for the provider to judge.
pub fn translate(
    conversation: &[Message],
    settings: &ChatSettings,
    limits: &dyn ModelLimits,
) -> ProviderRequest {
    let messages = conversation
        .iter()
        .skip(1)
        .map(translate_message)
        .collect();

    ProviderRequest {
        model: settings.model.clone(),
        messages,
        temperature: settings.resolved_temperature(),
        system: system_prompt(conversation),
        max_tokens: resolve_max_tokens(limits, &settings.model),
        stream: true,
    }
}

fn system_prompt(conversation: &[Message]) -> String {
    conversation
        .first()
        .and_then(|message| message.content.as_ref())
        .map(|content| content.to_text())
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
}

fn translate_message(message: &Message) -> AnthropicMessage {
    let content = message
        .content
        .clone()
        .map(|content| content.into_parts())
        .unwrap_or_default()
        .into_iter()
        .map(translate_part)
        .collect();

    AnthropicMessage {
        role: message.role.clone(),
        content,
    }
}

fn translate_part(part: ContentPart) -> MessagePart {
    if let Some(url) = part.as_image_url() {
        return MessagePart::image(media_type_from_data_url(url), base64_from_data_url(url));
    }

    match part {
        ContentPart::Text(text) => MessagePart::text(text),
        // Image references with an empty url are forwarded exactly as received
        ContentPart::ImageUrl { raw, .. } => MessagePart::Passthrough(raw),
        ContentPart::Unknown(value) => MessagePart::Passthrough(value),
    }
}
