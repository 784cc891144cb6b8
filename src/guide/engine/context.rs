//! Shared services for one running guide.

use std::sync::Arc;

use tracing::info;

use crate::guide::core::config::AssistantConfig;
use crate::guide::core::errors::AssistantResult;
use crate::guide::corpus::chunker::ChunkerSettings;
use crate::guide::corpus::embedder::{Embedder, gemini_embedder};
use crate::guide::corpus::index::CorpusIndex;
use crate::guide::generation::model::{TextGenerator, gemini_generator};
use crate::guide::session::machine::SessionMachine;
use crate::guide::session::state::SessionState;

/// Configuration, provider clients and the corpus index, built once at startup.
pub struct AssistantContext {
    config: AssistantConfig,
    index: Arc<CorpusIndex>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn TextGenerator>,
}

impl AssistantContext {
    /// Assemble a context from already built parts.
    #[must_use]
    pub fn new(
        config: AssistantConfig,
        index: Arc<CorpusIndex>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            config,
            index,
            embedder,
            generator,
        }
    }

    /// Validate `config`, build the Gemini clients and index the corpus.
    ///
    /// # Errors
    /// Returns `Configuration` for a missing credential or invalid settings,
    /// `CorpusUnavailable` if the corpus cannot be read, or the embedding
    /// error that aborted indexing.
    pub async fn from_config(config: AssistantConfig) -> AssistantResult<Self> {
        config.validate()?;
        let api_key = config.require_api_key()?;

        let embedder: Arc<dyn Embedder> = Arc::new(gemini_embedder(&config.embedding, api_key)?);
        let generator: Arc<dyn TextGenerator> = Arc::new(gemini_generator(&config.llm, api_key)?);

        let settings = ChunkerSettings::from_config(&config.corpus)?;
        let index = CorpusIndex::build_from_path(
            &config.corpus.path,
            settings,
            embedder.as_ref(),
            config.corpus.embed_batch_size,
        )
        .await?;
        info!(
            "Guide ready: {} passages, completion model {}",
            index.len(),
            config.llm.model
        );

        Ok(Self::new(config, Arc::new(index), embedder, generator))
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Shared corpus index.
    #[must_use]
    pub fn index(&self) -> Arc<CorpusIndex> {
        Arc::clone(&self.index)
    }

    /// Shared embedder.
    #[must_use]
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        Arc::clone(&self.embedder)
    }

    /// Shared text generator.
    #[must_use]
    pub fn generator(&self) -> Arc<dyn TextGenerator> {
        Arc::clone(&self.generator)
    }

    /// Session machine over these services.
    #[must_use]
    pub fn machine(&self) -> SessionMachine {
        SessionMachine::new(self)
    }

    /// Fresh session state sized by the memory settings.
    #[must_use]
    pub const fn new_session(&self) -> SessionState {
        SessionState::new(self.config.memory.window_pairs)
    }
}
