//! DSCPL spiritual guide.
//!
//! This module is organized into:
//! - `core`: Configuration, errors and categories
//! - `corpus`: Chunking, embedding and the in-memory corpus index
//! - `retrieval`: Similarity search over the index
//! - `conversation`: Turns and sliding-window memory
//! - `generation`: Model access, prompts, answer synthesis and templated content
//! - `session`: The guided-flow state machine and its snapshots
//! - `engine`: Provider wiring and the shared context

pub mod conversation;
pub mod core;
pub mod corpus;
pub mod engine;
pub mod generation;
pub mod retrieval;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types for convenience
pub use conversation::{ConversationMemory, Role, Turn};
pub use self::core::{AssistantConfig, AssistantError, AssistantResult, Category};
pub use corpus::{Chunk, ChunkerSettings, CorpusIndex, Embedder};
pub use engine::AssistantContext;
pub use generation::{Answer, AnswerSynthesizer, ContentGenerator, TextGenerator};
pub use session::{DispatchOutcome, SessionEvent, SessionMachine, SessionSnapshot, SessionState, Stage};
