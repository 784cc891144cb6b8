//! Retrieval-augmented answer synthesis.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::guide::conversation::memory::ConversationMemory;
use crate::guide::core::errors::AssistantResult;
use crate::guide::corpus::chunker::Chunk;
use crate::guide::corpus::embedder::Embedder;
use crate::guide::corpus::index::CorpusIndex;
use crate::guide::generation::model::{GenerationRequest, TextGenerator, non_empty};
use crate::guide::generation::prompt::{
    PERSONA_PREAMBLE, PromptParts, build_prompt_block, enforce_budget,
};
use crate::guide::retrieval::search;

/// Answer text with the chunks it was grounded on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Answer {
    /// Model response.
    pub text: String,
    /// Grounding chunks, best first.
    pub sources: Vec<Chunk>,
}

/// Combines retrieval, conversation memory and one model call.
pub struct AnswerSynthesizer {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn TextGenerator>,
    top_k: usize,
    max_prompt_chars: usize,
}

impl AnswerSynthesizer {
    /// Create a synthesizer.
    #[must_use]
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn TextGenerator>,
        top_k: usize,
        max_prompt_chars: usize,
    ) -> Self {
        Self {
            embedder,
            generator,
            top_k,
            max_prompt_chars,
        }
    }

    /// Answer `question` grounded on the index and the memory window.
    ///
    /// `memory` is the conversation before the question is recorded.
    ///
    /// # Errors
    /// Returns `EmbeddingProvider` if the question cannot be embedded, or
    /// `Generation` if the model fails or returns empty content.
    pub async fn answer(
        &self,
        question: &str,
        memory: &ConversationMemory,
        index: &CorpusIndex,
    ) -> AssistantResult<Answer> {
        let context = search::query(index, self.embedder.as_ref(), question, self.top_k).await?;

        let parts = PromptParts {
            context,
            history: memory.window().to_vec(),
            question: question.to_string(),
        };
        let parts = enforce_budget(parts, self.max_prompt_chars);
        let prompt = build_prompt_block(&parts);
        debug!(
            "Synthesizing with {} passages and {} history turns ({} chars)",
            parts.context.len(),
            parts.history.len(),
            prompt.len()
        );

        let request = GenerationRequest::new(prompt).with_preamble(PERSONA_PREAMBLE);
        let text = non_empty(self.generator.generate(request).await?)?;

        info!("Answered question with {} sources", parts.context.len());
        Ok(Answer {
            text,
            sources: parts.context,
        })
    }
}
