//! Upstream provider: base URL, credentials and owned endpoints

use indexmap::IndexMap;
use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::proxy::headers::build_auth_headers;
use crate::proxy::ident::unique_identifier;
use crate::proxy::Endpoint;

/// Default authorization scheme prefixed to the API key
pub const DEFAULT_AUTH_SCHEME: &str = "Bearer";

/// A named upstream service and the endpoints it exposes
///
/// Built once at startup. Apart from the identifier, which is assigned when
/// the provider joins a [`Registry`](crate::proxy::Registry), it is never
/// mutated after registration.
#[derive(Debug, Clone)]
pub struct Provider {
    pub(crate) id: Option<String>,
    pub name: String,
    pub description: String,
    pub base_url: String,
    api_key: Option<String>,
    pub auth_scheme: String,
    pub enabled: bool,
    /// Endpoints keyed by path, in registration order
    endpoints: IndexMap<String, Endpoint>,
}

impl Provider {
    pub fn new(name: &str, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: String::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            enabled: true,
            endpoints: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_scheme = scheme.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Identifier assigned at registration, `None` before that
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Attach an endpoint, assigning it an identifier unique within this provider
    ///
    /// Endpoints are keyed by path: adding a second endpoint with the same
    /// path replaces the first.
    pub fn add_endpoint(&mut self, mut endpoint: Endpoint) {
        let id = unique_identifier(&endpoint.name, |candidate| {
            self.endpoints
                .values()
                .any(|existing| existing.id() == Some(candidate))
        });
        endpoint.id = Some(id);

        let path = endpoint.path.clone();
        if let Some(previous) = self.endpoints.insert(path.clone(), endpoint) {
            warn!(
                provider = %self.name,
                path = %path,
                replaced = ?previous.id(),
                "Endpoint path registered twice, replacing earlier endpoint"
            );
        } else {
            debug!(provider = %self.name, path = %path, "Endpoint added");
        }
    }

    /// Look up an endpoint by its path
    pub fn get_endpoint(&self, path: &str) -> AppResult<&Endpoint> {
        self.endpoints.get(path).ok_or_else(|| {
            AppError::NotFound(format!("Endpoint {} not found on provider {}", path, self.name))
        })
    }

    /// Look up an endpoint by identifier, falling back to its path
    ///
    /// The path may be given with or without its leading slash.
    pub fn find_endpoint(&self, reference: &str) -> AppResult<&Endpoint> {
        if let Some(endpoint) = self
            .endpoints
            .values()
            .find(|endpoint| endpoint.id() == Some(reference))
        {
            return Ok(endpoint);
        }

        if reference.starts_with('/') {
            self.get_endpoint(reference)
        } else {
            self.get_endpoint(&format!("/{}", reference))
        }
    }

    /// Endpoints in registration order, keyed by path
    pub fn endpoints(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.endpoints.iter().map(|(path, endpoint)| (path.as_str(), endpoint))
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Outbound headers: `Authorization: <scheme> <key>` and `Content-Type`
    pub fn headers(&self, content_type: &str) -> AppResult<HeaderMap> {
        build_auth_headers(&self.auth_scheme, self.api_key.as_deref(), content_type)
    }
}
