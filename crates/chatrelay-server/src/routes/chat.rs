use crate::error::EnvelopeResponse;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use chatrelay::{
    errors::{ErrorEnvelope, ProviderError},
    models::chat::ChatRequest,
    providers::base::TokenStream,
};
use futures::{
    stream::{self, BoxStream},
    Stream, StreamExt, TryStreamExt,
};
use serde_json::json;
use std::{
    pin::Pin,
    task::{Context, Poll},
};

pub const CHAT_PATH: &str = "/api/chat/anthropic";

/// Outbound framing, picked by the `x-protocol` request header
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamProtocol {
    /// Raw token text
    Text,
    /// Vercel AI data stream protocol
    Data,
}

impl StreamProtocol {
    fn from_headers(headers: &HeaderMap) -> Result<Self, ErrorEnvelope> {
        let Some(protocol) = headers.get("x-protocol") else {
            return Ok(StreamProtocol::Text);
        };
        match protocol.to_str() {
            Ok("text") => Ok(StreamProtocol::Text),
            Ok("data") => Ok(StreamProtocol::Data),
            _ => Err(ErrorEnvelope::new("Unsupported stream protocol", 400)),
        }
    }

    fn headers(self) -> Vec<(HeaderName, HeaderValue)> {
        match self {
            StreamProtocol::Text => vec![(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            StreamProtocol::Data => vec![
                (header::CONTENT_TYPE, HeaderValue::from_static("text/event-stream")),
                (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
                (
                    HeaderName::from_static("x-vercel-ai-data-stream"),
                    HeaderValue::from_static("v1"),
                ),
            ],
        }
    }
}

// Protocol-specific message formatting
struct ProtocolFormatter;

impl ProtocolFormatter {
    fn format_text(text: &str) -> String {
        let encoded_text = serde_json::to_string(text).unwrap_or_else(|_| String::new());
        format!("0:{}\n", encoded_text)
    }

    fn format_finish(reason: &str) -> String {
        // Finish messages start with "d:"
        let finish = json!({
            "finishReason": reason,
            "usage": {
                "promptTokens": 0,
                "completionTokens": 0
            }
        });
        format!("d:{}\n", finish)
    }
}

/// Streaming response body re-framing provider tokens as they arrive
///
/// Nothing is buffered. Dropping the body, as hyper does when the client goes away, drops the
/// provider stream with it.
pub struct SseResponse {
    frames: BoxStream<'static, Result<Bytes, ProviderError>>,
    protocol: StreamProtocol,
}

impl SseResponse {
    pub fn new(tokens: TokenStream, protocol: StreamProtocol) -> Self {
        let frames = match protocol {
            StreamProtocol::Text => tokens.map_ok(Bytes::from).boxed(),
            StreamProtocol::Data => tokens
                .map_ok(|text| Bytes::from(ProtocolFormatter::format_text(&text)))
                .chain(stream::once(async {
                    Ok(Bytes::from(ProtocolFormatter::format_finish("stop")))
                }))
                .boxed(),
        };
        Self { frames, protocol }
    }
}

impl Stream for SseResponse {
    type Item = Result<Bytes, ProviderError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.as_mut().poll_next(cx)
    }
}

impl IntoResponse for SseResponse {
    fn into_response(self) -> Response {
        let headers = self.protocol.headers();
        let mut response = Response::new(Body::from_stream(self));
        response.headers_mut().extend(headers);
        response
    }
}

async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<SseResponse, EnvelopeResponse> {
    let protocol = StreamProtocol::from_headers(&headers)?;
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected chat request body: {}", rejection.body_text());
        ErrorEnvelope::new(rejection.body_text(), rejection.status().as_u16())
    })?;

    let tokens = state.relay.chat(request).await?;
    Ok(SseResponse::new(tokens, protocol))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(CHAT_PATH, post(handler))
        .with_state(state)
}
