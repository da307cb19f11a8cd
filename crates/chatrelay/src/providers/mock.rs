use async_trait::async_trait;
use futures::stream;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::base::{Provider, ProviderFactory, TokenStream};
use crate::providers::types::ProviderRequest;

/// How the mock provider answers a request
#[derive(Debug, Clone)]
pub enum MockReply {
    Tokens(Vec<String>),
    Fail { status: u16, detail: String },
}

/// A mock provider factory that records what it was asked for
#[derive(Clone)]
pub struct MockProviderFactory {
    reply: MockReply,
    pub keys: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl MockProviderFactory {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            keys: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

struct MockProvider {
    reply: MockReply,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
}

#[async_trait]
impl Provider for MockProvider {
    async fn stream(&self, request: &ProviderRequest) -> Result<TokenStream, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            MockReply::Tokens(tokens) => Ok(Box::pin(stream::iter(
                tokens.clone().into_iter().map(Ok),
            ))),
            MockReply::Fail { status, detail } => Err(ProviderError::Api {
                status: *status,
                detail: Some(detail.clone()),
                message: None,
            }),
        }
    }
}

impl ProviderFactory for MockProviderFactory {
    fn name(&self) -> &str {
        "Anthropic"
    }

    fn build(&self, api_key: &str) -> Result<Box<dyn Provider>, ProviderError> {
        self.keys.lock().unwrap().push(api_key.to_string());
        Ok(Box::new(MockProvider {
            reply: self.reply.clone(),
            requests: self.requests.clone(),
        }))
    }
}
