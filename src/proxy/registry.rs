//! Provider registry and request dispatch

use serde_json::Value;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::proxy::ident::unique_identifier;
use crate::proxy::logging::RequestContext;
use crate::proxy::{Endpoint, Provider};

/// Ordered collection of providers, built once at startup
///
/// The registry is populated sequentially before any request is served and
/// then shared read-only, so lookups need no locking.
#[derive(Debug, Default)]
pub struct Registry {
    providers: Vec<Provider>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under an identifier derived from its name
    pub fn add_provider(&mut self, mut provider: Provider) {
        let id = unique_identifier(&provider.name, |candidate| {
            self.providers
                .iter()
                .any(|existing| existing.id() == Some(candidate))
        });

        info!(
            provider_id = %id,
            name = %provider.name,
            endpoints = provider.endpoint_count(),
            enabled = provider.enabled,
            "Provider registered"
        );

        provider.id = Some(id);
        self.providers.push(provider);
    }

    /// Look up a provider by identifier
    pub fn get_provider(&self, id: &str) -> AppResult<&Provider> {
        self.providers
            .iter()
            .find(|provider| provider.id() == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", id)))
    }

    /// Providers in registration order
    pub fn providers(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a provider identifier and endpoint reference to the registered instances
    ///
    /// Disabled providers and endpoints are rejected.
    pub fn resolve(&self, provider_id: &str, endpoint_ref: &str) -> AppResult<(&Provider, &Endpoint)> {
        let provider = self.get_provider(provider_id)?;
        if !provider.enabled {
            return Err(AppError::Disabled(format!("Provider {} is disabled", provider_id)));
        }

        let endpoint = provider.find_endpoint(endpoint_ref)?;
        if !endpoint.enabled {
            return Err(AppError::Disabled(format!(
                "Endpoint {} of provider {} is disabled",
                endpoint_ref, provider_id
            )));
        }

        Ok((provider, endpoint))
    }

    /// Dispatch `body` to the endpoint and return the raw upstream response
    ///
    /// Lookup and transport failures are returned unchanged; upstream error
    /// statuses are not failures here and come back as responses.
    pub async fn handle_request(
        &self,
        client: &reqwest::Client,
        provider_id: &str,
        endpoint_ref: &str,
        body: Value,
    ) -> AppResult<reqwest::Response> {
        match self.resolve(provider_id, endpoint_ref) {
            Ok((provider, endpoint)) => Self::dispatch(client, provider, endpoint, body).await,
            Err(e) => {
                RequestContext::new(provider_id, endpoint_ref).log_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Dispatch to a provider and endpoint already returned by [`Registry::resolve`]
    pub async fn dispatch(
        client: &reqwest::Client,
        provider: &Provider,
        endpoint: &Endpoint,
        body: Value,
    ) -> AppResult<reqwest::Response> {
        let ctx = RequestContext::new(
            provider.id().unwrap_or_default(),
            endpoint.id().unwrap_or_default(),
        );
        ctx.log_request_start();

        let result = endpoint.handle_request(client, provider, body, &ctx).await;
        if let Err(e) = &result {
            ctx.log_error(&e.to_string());
        }

        result
    }
}
