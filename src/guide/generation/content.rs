//! Template-driven one-shot content generation.
//!
//! This path never consults the corpus index.

use std::sync::Arc;

use tracing::info;

use crate::guide::core::category::Category;
use crate::guide::core::errors::AssistantResult;
use crate::guide::generation::model::{
    GenerationRequest, TextGenerator, non_empty, strip_code_fence,
};
use crate::guide::generation::templates::template_for;

/// Produces structured devotion, prayer, meditation and accountability content.
pub struct ContentGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    /// Create a content generator.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate content for `category` on `topic` with one model call.
    ///
    /// # Errors
    /// Returns `InvalidCategory` for `Chat`, or `Generation` if the model
    /// fails or returns empty content.
    pub async fn generate(&self, category: Category, topic: &str) -> AssistantResult<String> {
        let template = template_for(category)?;
        let prompt = template.render(topic);
        let raw = self
            .generator
            .generate(GenerationRequest::new(prompt))
            .await?;
        let content = non_empty(strip_code_fence(&raw).to_string())?;
        info!("Generated {category} content on {topic:?} ({} chars)", content.len());
        Ok(content)
    }
}
