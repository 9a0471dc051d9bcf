//! A single remote operation exposed by a provider

use std::path::PathBuf;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Instrument;

use crate::error::{AppError, AppResult};
use crate::providers::{EndpointKind, UpstreamRequest};
use crate::proxy::headers::JSON_CONTENT_TYPE;
use crate::proxy::logging::RequestContext;
use crate::proxy::Provider;

/// Upstream operation reachable through the dispatch route
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub(crate) id: Option<String>,
    pub name: String,
    pub description: String,
    pub method: Method,
    /// Path appended to the owning provider's base URL
    pub path: String,
    pub category: Option<String>,
    pub original_docs_url: Option<String>,
    pub enabled: bool,
    /// Examples file, relative to the configured examples directory
    pub examples: Option<PathBuf>,
    pub kind: EndpointKind,
}

impl Endpoint {
    pub fn new(name: &str, method: Method, path: &str, kind: EndpointKind) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: String::new(),
            method,
            path: path.to_string(),
            category: None,
            original_docs_url: None,
            enabled: true,
            examples: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_docs_url(mut self, url: impl Into<String>) -> Self {
        self.original_docs_url = Some(url.into());
        self
    }

    pub fn with_examples(mut self, file: impl Into<PathBuf>) -> Self {
        self.examples = Some(file.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Identifier assigned when the endpoint was added to a provider
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Forward `body` to the upstream operation and return its raw response
    ///
    /// The body is decoded into the endpoint's typed request before it is
    /// sent. Whatever status the upstream answers with is returned as is.
    pub async fn handle_request(
        &self,
        client: &reqwest::Client,
        provider: &Provider,
        body: Value,
        ctx: &RequestContext,
    ) -> AppResult<reqwest::Response> {
        self.kind
            .handle(self, client, provider, body, ctx)
            .instrument(ctx.create_span())
            .await
    }

    /// Decode `body` as `T` and send it upstream
    pub(crate) async fn forward<T>(
        &self,
        client: &reqwest::Client,
        provider: &Provider,
        body: Value,
        ctx: &RequestContext,
    ) -> AppResult<reqwest::Response>
    where
        T: UpstreamRequest,
    {
        let request: T = serde_json::from_value(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid {} request: {}", self.name, e)))?;
        request.validate()?;

        let url = format!("{}{}", provider.base_url, self.path);
        ctx.log_upstream_request(self.method.as_str(), &url);

        let mut builder = client
            .request(self.method.clone(), &url)
            .headers(provider.headers(JSON_CONTENT_TYPE)?);

        if self.method != Method::GET && self.method != Method::HEAD {
            builder = builder.json(&request);
        }

        let response = builder.send().await?;
        ctx.log_upstream_response(response.status().as_u16(), response.content_length());

        Ok(response)
    }
}

/// Response half of an [`Example`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExampleResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

/// A worked example shown next to an endpoint in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Example {
    pub label: String,
    /// Snippet per language
    pub code: indexmap::IndexMap<String, String>,
    pub response: ExampleResponse,
}
