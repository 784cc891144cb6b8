//! Error types for the guide subsystem.

use std::path::PathBuf;

use thiserror::Error;

use crate::guide::session::state::Stage;

/// Guide subsystem error type.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Missing credential, missing corpus, or out-of-range settings.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The corpus source could not be read.
    #[error("corpus unavailable at {path}: {source}")]
    CorpusUnavailable {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The embedding provider failed or returned malformed vectors.
    #[error("embedding provider error: {0}")]
    EmbeddingProvider(String),
    /// The generative model failed or returned no content.
    #[error("generation error: {0}")]
    Generation(String),
    /// Content generation was asked for a category without a template.
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    /// The event is not accepted in the current stage.
    #[error("invalid transition: {event} is not accepted in stage {stage}")]
    InvalidTransition {
        /// Stage the session was in.
        stage: Stage,
        /// Name of the rejected event.
        event: &'static str,
    },
}

impl AssistantError {
    /// Whether the failure came from an external provider and may succeed on resubmission.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmbeddingProvider(_) | Self::Generation(_))
    }
}

impl From<rig::embeddings::EmbeddingError> for AssistantError {
    fn from(err: rig::embeddings::EmbeddingError) -> Self {
        Self::EmbeddingProvider(err.to_string())
    }
}

impl From<rig::completion::CompletionError> for AssistantError {
    fn from(err: rig::completion::CompletionError) -> Self {
        Self::Generation(err.to_string())
    }
}

impl From<rig::http_client::Error> for AssistantError {
    fn from(err: rig::http_client::Error) -> Self {
        Self::Configuration(format!("cannot build provider client: {err}"))
    }
}

impl From<url::ParseError> for AssistantError {
    fn from(err: url::ParseError) -> Self {
        Self::Configuration(format!("invalid url: {err}"))
    }
}

/// Convenience result alias for guide operations.
pub type AssistantResult<T> = Result<T, AssistantError>;
