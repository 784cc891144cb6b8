//! Events accepted by the session machine.

use serde::{Deserialize, Serialize};

use crate::guide::core::category::Category;

/// User-initiated event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Pick a menu category, including "Just Chat".
    SelectCategory(Category),
    /// Pick a preset or custom topic.
    SelectTopic(String),
    /// Confirm the program.
    Confirm,
    /// Go back one stage.
    GoBack,
    /// Send a chat message.
    SubmitMessage(String),
    /// Return to the main menu, discarding the session.
    ReturnToMenu,
    /// Ask for immediate encouragement (Accountability only).
    Sos,
}

impl SessionEvent {
    /// Stable event name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelectCategory(_) => "select_category",
            Self::SelectTopic(_) => "select_topic",
            Self::Confirm => "confirm",
            Self::GoBack => "go_back",
            Self::SubmitMessage(_) => "submit_message",
            Self::ReturnToMenu => "return_to_menu",
            Self::Sos => "sos",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type":"select_category","value":"Devotion"}"#).unwrap();
        assert_eq!(event, SessionEvent::SelectCategory(Category::Devotion));

        let event: SessionEvent = serde_json::from_str(r#"{"type":"confirm"}"#).unwrap();
        assert_eq!(event, SessionEvent::Confirm);
        assert_eq!(event.name(), "confirm");
    }

    #[test]
    fn test_select_category_accepts_menu_label() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type":"select_category","value":"Just Chat"}"#).unwrap();
        assert_eq!(event, SessionEvent::SelectCategory(Category::Chat));
        assert!(
            serde_json::from_str::<SessionEvent>(r#"{"type":"select_category","value":"Fasting"}"#)
                .is_err()
        );
    }
}
