//! Configuration for the guide subsystem.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::guide::core::errors::{AssistantError, AssistantResult};

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable overriding the corpus path.
pub const CORPUS_PATH_ENV: &str = "DSCPL_CORPUS_PATH";
/// Environment variable overriding the completion model.
pub const LLM_MODEL_ENV: &str = "DSCPL_LLM_MODEL";
/// Environment variable overriding the embedding model.
pub const EMBEDDING_MODEL_ENV: &str = "DSCPL_EMBEDDING_MODEL";
/// Environment variable overriding the provider base URL.
pub const BASE_URL_ENV: &str = "DSCPL_BASE_URL";

/// Provider credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential, rejecting blank values.
    ///
    /// # Errors
    /// Returns a configuration error if the key is empty after trimming.
    pub fn new(value: impl Into<String>) -> AssistantResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AssistantError::Configuration(format!(
                "{API_KEY_ENV} is empty"
            )));
        }
        Ok(Self(value.trim().to_string()))
    }

    /// Raw credential for the provider client.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Top-level configuration for the guide.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Provider credential; required before any provider client is built.
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
    /// Corpus source and chunking.
    pub corpus: CorpusConfig,
    /// Embedding model settings.
    pub embedding: EmbeddingConfig,
    /// Completion model settings.
    pub llm: LlmConfig,
    /// Retrieval settings.
    pub retrieval: RetrievalConfig,
    /// Conversation window settings.
    pub memory: MemoryConfig,
    /// Prompt construction settings.
    pub prompt: PromptConfig,
}

impl AssistantConfig {
    /// Build a configuration from defaults plus environment overrides.
    ///
    /// A missing credential is not an error here; it is rejected when the
    /// provider clients are constructed.
    ///
    /// # Errors
    /// Returns an error if the credential variable is set but blank.
    pub fn from_env() -> AssistantResult<Self> {
        let mut config = Self::default();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.api_key = Some(ApiKey::new(key)?);
        }
        if let Ok(path) = std::env::var(CORPUS_PATH_ENV) {
            config.corpus.path = PathBuf::from(path);
        }
        if let Ok(model) = std::env::var(LLM_MODEL_ENV) {
            config.llm.model = model;
        }
        if let Ok(model) = std::env::var(EMBEDDING_MODEL_ENV) {
            config.embedding.model = model;
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.llm.base_url = Some(base_url.clone());
            config.embedding.base_url = Some(base_url);
        }
        Ok(config)
    }

    /// Return the credential or fail fast.
    ///
    /// # Errors
    /// Returns a configuration error if no credential was supplied.
    pub fn require_api_key(&self) -> AssistantResult<&ApiKey> {
        self.api_key.as_ref().ok_or_else(|| {
            AssistantError::Configuration(format!("{API_KEY_ENV} is not set"))
        })
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> AssistantResult<()> {
        self.corpus.validate()?;

        if self.embedding.ndims == 0 {
            return Err(AssistantError::Configuration(
                "embedding.ndims must be > 0".to_string(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(AssistantError::Configuration(
                "retrieval.top_k must be > 0".to_string(),
            ));
        }

        if self.memory.window_pairs == 0 {
            return Err(AssistantError::Configuration(
                "memory.window_pairs must be > 0".to_string(),
            ));
        }

        if self.prompt.max_chars == 0 {
            return Err(AssistantError::Configuration(
                "prompt.max_chars must be > 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AssistantError::Configuration(
                "llm.temperature must be within [0, 2]".to_string(),
            ));
        }

        if let Some(base_url) = &self.embedding.base_url {
            Url::parse(base_url)?;
        }

        if let Some(base_url) = &self.llm.base_url {
            Url::parse(base_url)?;
        }

        Ok(())
    }
}

/// Corpus source and chunking settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path of the plain-text corpus.
    pub path: PathBuf,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Maximum characters shared by consecutive chunks.
    pub overlap: usize,
    /// Number of chunks sent per embedding request.
    pub embed_batch_size: usize,
}

impl CorpusConfig {
    /// Validate chunking parameters.
    ///
    /// # Errors
    /// Returns an error if the chunk window cannot make progress.
    pub fn validate(&self) -> AssistantResult<()> {
        if self.chunk_size == 0 {
            return Err(AssistantError::Configuration(
                "corpus.chunk_size must be > 0".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(AssistantError::Configuration(
                "corpus.overlap must be smaller than corpus.chunk_size".to_string(),
            ));
        }
        if self.embed_batch_size == 0 {
            return Err(AssistantError::Configuration(
                "corpus.embed_batch_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("asv.txt"),
            chunk_size: 1000,
            overlap: 200,
            embed_batch_size: 64,
        }
    }
}

/// Embedding model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model name.
    pub model: String,
    /// Embedding vector dimensions.
    pub ndims: usize,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-004".to_string(),
            ndims: 768,
            base_url: None,
        }
    }
}

/// Completion model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Completion model name.
    pub model: String,
    /// Temperature for generation.
    pub temperature: f64,
    /// Optional max tokens.
    pub max_tokens: Option<u64>,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: None,
            base_url: None,
        }
    }
}

/// Retrieval settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks used as grounding.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Conversation window settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of user/assistant pairs passed to the synthesizer.
    pub window_pairs: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { window_pairs: 5 }
    }
}

/// Prompt construction settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Maximum prompt size in characters.
    pub max_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { max_chars: 12_000 }
    }
}
