//! Provider wiring and the shared assistant context.

pub mod context;
pub mod providers;

pub use context::AssistantContext;
pub use providers::gemini_client;
