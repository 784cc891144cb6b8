//! Generative model wrapper for Rig.

use std::future::Future;
use std::pin::Pin;

use rig::OneOrMany;
use rig::client::CompletionClient;
use rig::completion::CompletionModel;
use rig::message::AssistantContent;
use tracing::debug;

use crate::guide::core::config::{ApiKey, LlmConfig};
use crate::guide::core::errors::{AssistantError, AssistantResult};
use crate::guide::engine::providers::gemini_client;

/// Boxed future type for generator operations.
pub type GenerateFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single-shot generation request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    /// Optional system instruction.
    pub preamble: Option<String>,
    /// User prompt.
    pub prompt: String,
}

impl GenerationRequest {
    /// Request with a prompt and no preamble.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            preamble: None,
            prompt: prompt.into(),
        }
    }

    /// Attach a system instruction.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }
}

/// Trait abstraction over the generative model.
pub trait TextGenerator: Send + Sync {
    /// Run one completion and return the full response text.
    ///
    /// # Errors
    /// Returns `Generation` if the call fails or produces no text.
    fn generate(&self, request: GenerationRequest) -> GenerateFuture<'_, AssistantResult<String>>;
}

/// Generator backed by any Rig completion model.
#[derive(Clone)]
pub struct RigGenerator<M> {
    model: M,
    temperature: f64,
    max_tokens: Option<u64>,
}

impl<M> RigGenerator<M> {
    /// Wrap an already configured Rig model.
    #[must_use]
    pub const fn new(model: M, temperature: f64, max_tokens: Option<u64>) -> Self {
        Self {
            model,
            temperature,
            max_tokens,
        }
    }
}

/// Build the Gemini generator from config.
///
/// # Errors
/// Returns an error if the base URL is invalid or the client cannot be built.
pub fn gemini_generator(
    config: &LlmConfig,
    api_key: &ApiKey,
) -> AssistantResult<RigGenerator<impl CompletionModel + 'static>> {
    let client = gemini_client(api_key, config.base_url.as_deref())?;
    let model = client.completion_model(config.model.clone());
    Ok(RigGenerator::new(model, config.temperature, config.max_tokens))
}

impl<M> TextGenerator for RigGenerator<M>
where
    M: CompletionModel + Send + Sync + 'static,
{
    fn generate(&self, request: GenerationRequest) -> GenerateFuture<'_, AssistantResult<String>> {
        Box::pin(async move {
            let builder = self
                .model
                .completion_request(request.prompt)
                .temperature(self.temperature)
                .max_tokens_opt(self.max_tokens);
            let builder = if let Some(preamble) = request.preamble {
                builder.preamble(preamble)
            } else {
                builder
            };

            let response = self.model.completion(builder.build()).await?;
            let text = extract_text(&response.choice);
            debug!("Model returned {} chars", text.len());
            non_empty(text)
        })
    }
}

/// Reject blank model output.
///
/// # Errors
/// Returns `Generation` if the text is empty after trimming.
pub fn non_empty(text: String) -> AssistantResult<String> {
    if text.trim().is_empty() {
        return Err(AssistantError::Generation(
            "model returned empty content".to_string(),
        ));
    }
    Ok(text)
}

/// Unwrap a response the model wrapped in a single fenced code block.
///
/// The opening fence's language tag is dropped. Text that is not fenced, or
/// whose fence holds nothing, is returned trimmed.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    match inner.split_once('\n') {
        Some((_, body)) if !body.trim().is_empty() => body.trim(),
        _ => trimmed,
    }
}

fn extract_text(choice: &OneOrMany<AssistantContent>) -> String {
    let mut out = String::new();
    for content in choice.iter() {
        if let AssistantContent::Text(text) = content {
            out.push_str(&text.text);
        }
    }
    out
}
