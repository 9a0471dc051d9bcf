//! Configuration management for Nexura
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Public base URL of the dispatch route, used in the generated catalog
    pub public_api_url: String,

    /// OpenAI API URL
    pub openai_api_url: String,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// Whether the OpenAI provider is served and documented
    pub openai_enabled: bool,

    /// EdenAI API URL
    pub edenai_api_url: String,
    /// EdenAI API key
    pub edenai_api_key: Option<String>,
    /// Whether the EdenAI provider is served and documented
    pub edenai_enabled: bool,

    /// Directory holding endpoint example files
    pub examples_dir: PathBuf,
    /// Where `generate_docs` writes the catalog
    pub docs_output: PathBuf,
    /// Key required in `X-Docs-Key` for the docs routes; open when unset
    pub docs_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name-to-value source
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: var("NEXURA_HOST", "0.0.0.0"),
            port: var("NEXURA_PORT", "8080")
                .parse()
                .context("Invalid NEXURA_PORT")?,

            public_api_url: var("NEXURA_API_URL", "https://nexura.dev/api"),

            openai_api_url: var("OPENAI_API_URL", "https://api.openai.com"),
            openai_api_key: lookup("OPENAI_API_KEY"),
            openai_enabled: parse_flag(lookup("OPENAI_ENABLED"), true),

            edenai_api_url: var("EDENAI_API_URL", "https://api.edenai.run"),
            edenai_api_key: lookup("EDENAI_API_KEY"),
            edenai_enabled: parse_flag(lookup("EDENAI_ENABLED"), true),

            examples_dir: var("NEXURA_EXAMPLES_DIR", "catalog").into(),
            docs_output: var("NEXURA_DOCS_OUTPUT", "docs/src/docs.json").into(),
            docs_api_key: lookup("DOCS_API_KEY").filter(|k| !k.is_empty()),
        })
    }

    /// Configuration pointing every provider at a single base URL.
    ///
    /// Used by tests to aim all upstream traffic at one mock server.
    pub fn for_upstream(base_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_api_url: "http://localhost/api".to_string(),
            openai_api_url: base_url.to_string(),
            openai_api_key: Some("test-openai-key".to_string()),
            openai_enabled: true,
            edenai_api_url: base_url.to_string(),
            edenai_api_key: Some("test-edenai-key".to_string()),
            edenai_enabled: true,
            examples_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalog"),
            docs_output: PathBuf::from("docs/src/docs.json"),
            docs_api_key: None,
        }
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    value.map(|v| v == "true" || v == "1").unwrap_or(default)
}
