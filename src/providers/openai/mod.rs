//! OpenAI provider

pub mod completions;

use crate::config::Config;
use crate::proxy::Provider;

/// Build the OpenAI provider with its endpoints attached
pub fn provider(config: &Config) -> Provider {
    let mut provider = Provider::new(
        "OpenAI",
        &config.openai_api_url,
        config.openai_api_key.clone(),
    )
    .with_description("OpenAI provider")
    .with_enabled(config.openai_enabled);

    provider.add_endpoint(completions::endpoint());
    provider
}
