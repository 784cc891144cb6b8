//! Generative model access, prompts, answer synthesis and guided content.

pub mod content;
pub mod model;
pub mod prompt;
pub mod synthesizer;
pub mod templates;

pub use content::ContentGenerator;
pub use model::{
    GenerateFuture, GenerationRequest, RigGenerator, TextGenerator, gemini_generator,
    strip_code_fence,
};
pub use prompt::{PERSONA_PREAMBLE, PromptParts, build_prompt_block, enforce_budget, prompt_chars};
pub use synthesizer::{Answer, AnswerSynthesizer};
pub use templates::{ContentTemplate, TemplateSection, template_for};
