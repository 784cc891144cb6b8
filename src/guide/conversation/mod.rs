//! Conversation turns and sliding-window memory.

pub mod memory;
pub mod turn;

pub use memory::{ConversationMemory, DEFAULT_WINDOW_PAIRS};
pub use turn::{Role, Turn};
