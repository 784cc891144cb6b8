//! Provider client construction.

use reqwest::Client as ReqwestClient;
use rig::providers::gemini;
use tracing::debug;
use url::Url;

use crate::guide::core::config::ApiKey;
use crate::guide::core::errors::AssistantResult;

/// Build a Gemini client, optionally against a custom base URL.
///
/// # Errors
/// Returns a configuration error if the URL is invalid or the client cannot be built.
pub fn gemini_client(
    api_key: &ApiKey,
    base_url: Option<&str>,
) -> AssistantResult<gemini::Client<ReqwestClient>> {
    let builder = gemini::Client::<ReqwestClient>::builder().api_key(api_key.expose());
    let builder = if let Some(base_url) = base_url {
        Url::parse(base_url)?;
        debug!("Using provider base URL {base_url}");
        builder.base_url(base_url)
    } else {
        builder
    };
    Ok(builder.build()?)
}
