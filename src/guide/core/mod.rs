//! Core guide types: configuration, errors and categories.

pub mod category;
pub mod config;
pub mod errors;

pub use category::Category;
pub use config::{
    ApiKey, AssistantConfig, CorpusConfig, EmbeddingConfig, LlmConfig, MemoryConfig,
    PromptConfig, RetrievalConfig,
};
pub use errors::{AssistantError, AssistantResult};
