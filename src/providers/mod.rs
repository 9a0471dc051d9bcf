//! Concrete upstream providers
//!
//! Each provider module builds its [`Provider`] with the endpoints it
//! exposes. [`EndpointKind`] is the closed set of endpoint handlers; dispatch
//! matches on it to pick the typed request for the outbound call.

pub mod edenai;
pub mod openai;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::AppResult;
use crate::proxy::logging::RequestContext;
use crate::proxy::{Endpoint, Provider, Registry};
use crate::schema::{Documented, FieldSpec};

/// Typed body accepted by an endpoint
pub trait UpstreamRequest: DeserializeOwned + Serialize + Documented {
    /// Reject requests the proxy cannot serve
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Stable discriminator for endpoint handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// OpenAI `POST /v1/chat/completions`
    OpenAiChatCompletions,
    /// EdenAI `POST /v2/text/chat`
    EdenAiChat,
}

impl EndpointKind {
    pub(crate) async fn handle(
        self,
        endpoint: &Endpoint,
        client: &reqwest::Client,
        provider: &Provider,
        body: Value,
        ctx: &RequestContext,
    ) -> AppResult<reqwest::Response> {
        match self {
            EndpointKind::OpenAiChatCompletions => {
                endpoint
                    .forward::<openai::completions::CompletionsRequest>(client, provider, body, ctx)
                    .await
            }
            EndpointKind::EdenAiChat => {
                endpoint
                    .forward::<edenai::chat::ChatRequest>(client, provider, body, ctx)
                    .await
            }
        }
    }

    /// Field table of the request body
    pub fn request_schema(self) -> Vec<FieldSpec> {
        match self {
            EndpointKind::OpenAiChatCompletions => {
                openai::completions::CompletionsRequest::schema()
            }
            EndpointKind::EdenAiChat => edenai::chat::ChatRequest::schema(),
        }
    }

    /// Field table of the upstream response body
    pub fn response_schema(self) -> Vec<FieldSpec> {
        match self {
            EndpointKind::OpenAiChatCompletions => {
                openai::completions::CompletionResponse::schema()
            }
            EndpointKind::EdenAiChat => edenai::chat::ChatResponse::schema(),
        }
    }
}

/// Build the registry with every known provider
pub fn build_registry(config: &Config) -> Registry {
    let mut registry = Registry::new();
    registry.add_provider(openai::provider(config));
    registry.add_provider(edenai::provider(config));
    registry
}
