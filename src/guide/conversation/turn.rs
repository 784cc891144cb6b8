//! Conversation turn model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::guide::corpus::chunker::Chunk;

/// Author of a turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// User input.
    User,
    /// Assistant response.
    Assistant,
}

impl Role {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message in the transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the turn.
    pub role: Role,
    /// Message text.
    pub text: String,
    /// Time the turn was recorded.
    pub timestamp: DateTime<Utc>,
    /// Grounding chunks cited by an assistant turn; empty for user turns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Chunk>,
}

impl Turn {
    /// Build a user turn.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
        }
    }

    /// Build an assistant turn with the chunks it was grounded on.
    #[must_use]
    pub fn assistant(text: impl Into<String>, sources: Vec<Chunk>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            sources,
        }
    }
}
