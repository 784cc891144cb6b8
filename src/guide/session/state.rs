//! Session state and stages of the guided flow.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::guide::conversation::memory::ConversationMemory;
use crate::guide::core::category::Category;

/// Node of the guided-flow state machine.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Main menu.
    #[default]
    InitialSelection,
    /// Choosing a preset or custom topic.
    TopicSelection,
    /// Weekly overview awaiting confirmation.
    Confirmation,
    /// Delivering generated content, followed by chat.
    ProgramDelivery,
    /// Free chat.
    Chat,
}

impl Stage {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialSelection => "initial_selection",
            Self::TopicSelection => "topic_selection",
            Self::Confirmation => "confirmation",
            Self::ProgramDelivery => "program_delivery",
            Self::Chat => "chat",
        }
    }

    /// Whether the stage runs the chat loop.
    #[must_use]
    pub const fn is_conversational(self) -> bool {
        matches!(self, Self::ProgramDelivery | Self::Chat)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of one user session. Mutated only by the session machine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current stage.
    pub stage: Stage,
    /// Selected category; `None` on the main menu.
    pub category: Option<Category>,
    /// Selected topic; empty until chosen.
    pub topic: String,
    /// Chat transcript.
    pub transcript: ConversationMemory,
    /// Content delivered for the current program stage entry.
    pub content: Option<String>,
}

impl SessionState {
    /// Fresh state on the main menu with a window of `window_pairs`.
    #[must_use]
    pub const fn new(window_pairs: usize) -> Self {
        Self {
            stage: Stage::InitialSelection,
            category: None,
            topic: String::new(),
            transcript: ConversationMemory::new(window_pairs),
            content: None,
        }
    }

    /// Reset to the initial defaults, keeping the window size.
    pub fn reset(&mut self) {
        *self = Self::new(self.transcript.window_pairs());
    }

    /// Check the stage/category/topic invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let category_ok = match self.stage {
            Stage::InitialSelection => self.category.is_none(),
            Stage::Chat => self.category.is_some(),
            Stage::TopicSelection | Stage::Confirmation | Stage::ProgramDelivery => self
                .category
                .is_some_and(Category::is_guided),
        };
        let topic_ok = match self.stage {
            Stage::InitialSelection => self.topic.is_empty(),
            Stage::Confirmation | Stage::ProgramDelivery => !self.topic.trim().is_empty(),
            Stage::TopicSelection | Stage::Chat => true,
        };
        category_ok && topic_ok
    }

    /// Whether the SOS action is available.
    #[must_use]
    pub fn sos_available(&self) -> bool {
        self.stage.is_conversational() && self.category == Some(Category::Accountability)
    }
}
