use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use serde_json::Value;

use super::base::{Provider, TokenStream};
use super::configs::AnthropicProviderConfig;
use super::sse::{SseEvent, SseParser};
use super::types::ProviderRequest;
use crate::errors::ProviderError;

pub struct AnthropicProvider {
    client: Client,
    config: AnthropicProviderConfig,
}

/// What a single stream event means for the relay
#[derive(Debug, PartialEq)]
enum StreamDelta {
    Text(String),
    Stop,
    Skip,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, request: &ProviderRequest) -> Result<Response, ProviderError> {
        let url = format!("{}/v1/messages", self.config.host.trim_end_matches('/'));

        tracing::debug!(model = %request.model, messages = request.messages.len(), "sending anthropic request");
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.version)
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Turn a non-success response into an error, keeping whatever message the body offers
    async fn error_from_response(response: Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ProviderError::Api {
                status,
                detail: value
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(String::from),
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(String::from),
            },
            Err(_) => ProviderError::Api {
                status,
                detail: None,
                message: Some(body).filter(|b| !b.trim().is_empty()),
            },
        }
    }

    fn decode_event(event: &SseEvent) -> Result<StreamDelta, ProviderError> {
        if event.data.is_empty() {
            return Ok(StreamDelta::Skip);
        }

        let value: Value = serde_json::from_str(&event.data).map_err(|e| {
            ProviderError::Stream(format!("invalid event payload: {}", e))
        })?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .or(event.event.as_deref())
            .unwrap_or_default();

        match kind {
            "content_block_delta" => {
                let delta = &value["delta"];
                match (delta["type"].as_str(), delta["text"].as_str()) {
                    (Some("text_delta"), Some(text)) => Ok(StreamDelta::Text(text.to_string())),
                    _ => Ok(StreamDelta::Skip),
                }
            }
            "message_stop" => Ok(StreamDelta::Stop),
            "error" => {
                let message = value
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown stream error");
                Err(ProviderError::Stream(message.to_string()))
            }
            other => {
                tracing::trace!(event = other, "skipping stream event");
                Ok(StreamDelta::Skip)
            }
        }
    }

    /// Lazily decode the event stream body into text tokens
    fn decode_stream(response: Response) -> TokenStream {
        Box::pin(async_stream::try_stream! {
            let mut body = response.bytes_stream();
            let mut parser = SseParser::new();
            let mut done = false;

            while !done {
                let events = match body.next().await {
                    Some(chunk) => parser.push_bytes(&chunk?),
                    None => {
                        done = true;
                        parser.finish()
                    }
                };

                for event in events {
                    match AnthropicProvider::decode_event(&event)? {
                        StreamDelta::Text(text) => {
                            yield text;
                        }
                        StreamDelta::Stop => {
                            done = true;
                            break;
                        }
                        StreamDelta::Skip => {}
                    }
                }
            }
        })
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn stream(&self, request: &ProviderRequest) -> Result<TokenStream, ProviderError> {
        let response = self.post(request).await?;
        Ok(Self::decode_stream(response))
    }
}
