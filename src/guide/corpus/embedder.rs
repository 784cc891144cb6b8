//! Embedding model wrapper for Rig.

use std::future::Future;
use std::pin::Pin;

use rig::client::EmbeddingsClient;
use rig::embeddings::{Embedding, EmbeddingModel};

use crate::guide::core::config::{ApiKey, EmbeddingConfig};
use crate::guide::core::errors::{AssistantError, AssistantResult};
use crate::guide::engine::providers::gemini_client;

/// Boxed future type for embedder operations.
pub type EmbedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstraction over embedding providers.
pub trait Embedder: Send + Sync {
    /// Embed a single text string.
    ///
    /// # Errors
    /// Returns an error if the embedding request fails.
    fn embed_text(&self, text: &str) -> EmbedFuture<'_, AssistantResult<Embedding>>;
    /// Embed multiple texts, one vector per input in input order.
    ///
    /// # Errors
    /// Returns an error if the embedding request fails.
    fn embed_texts(&self, texts: Vec<String>) -> EmbedFuture<'_, AssistantResult<Vec<Embedding>>>;
    /// Return embedding dimensionality.
    fn ndims(&self) -> usize;
}

/// Embedder backed by any Rig embedding model.
#[derive(Clone)]
pub struct RigEmbedder<M> {
    model: M,
    ndims: usize,
}

impl<M> RigEmbedder<M> {
    /// Wrap an already configured Rig model.
    #[must_use]
    pub const fn new(model: M, ndims: usize) -> Self {
        Self { model, ndims }
    }
}

/// Build the Gemini embedder from config.
///
/// # Errors
/// Returns an error if the base URL is invalid or the client cannot be built.
pub fn gemini_embedder(
    config: &EmbeddingConfig,
    api_key: &ApiKey,
) -> AssistantResult<RigEmbedder<impl EmbeddingModel + 'static>> {
    let client = gemini_client(api_key, config.base_url.as_deref())?;
    let model = client.embedding_model_with_ndims(config.model.clone(), config.ndims);
    Ok(RigEmbedder::new(model, config.ndims))
}

impl<M> Embedder for RigEmbedder<M>
where
    M: EmbeddingModel + Send + Sync + 'static,
{
    fn embed_text(&self, text: &str) -> EmbedFuture<'_, AssistantResult<Embedding>> {
        let text = text.to_string();
        Box::pin(async move {
            self.model
                .embed_text(&text)
                .await
                .map_err(AssistantError::from)
        })
    }

    fn embed_texts(&self, texts: Vec<String>) -> EmbedFuture<'_, AssistantResult<Vec<Embedding>>> {
        Box::pin(async move {
            self.model
                .embed_texts(texts)
                .await
                .map_err(AssistantError::from)
        })
    }

    fn ndims(&self) -> usize {
        self.ndims
    }
}
