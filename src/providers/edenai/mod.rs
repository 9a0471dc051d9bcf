//! EdenAI provider

pub mod chat;

use crate::config::Config;
use crate::proxy::Provider;

/// Build the EdenAI provider with its endpoints attached
pub fn provider(config: &Config) -> Provider {
    let mut provider = Provider::new(
        "EdenAI",
        &config.edenai_api_url,
        config.edenai_api_key.clone(),
    )
    .with_description("EdenAI provider")
    .with_enabled(config.edenai_enabled);

    provider.add_endpoint(chat::endpoint());
    provider
}
