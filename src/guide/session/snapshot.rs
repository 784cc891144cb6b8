//! Read-only projection of the session state for rendering.

use serde::Serialize;

use crate::guide::conversation::turn::Turn;
use crate::guide::core::category::Category;
use crate::guide::session::state::{SessionState, Stage};

/// Fixed crisis-support message shown by the SOS action.
pub const SOS_MESSAGE: &str = "You are strong in Christ! Take a deep breath. Read this: \
**'No temptation has overtaken you except what is common to mankind. And God is faithful; \
he will not let you be tempted beyond what you can bear.' - 1 Corinthians 10:13**. \
Now, step away from the situation for 5 minutes and call a trusted friend.";

/// Goal line shown on the confirmation stage.
pub const WEEKLY_GOAL: &str = "By the end of this week, you will feel more connected to God \
and confident in your spiritual journey.";

/// Everything the UI layer needs to draw the current stage.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Current stage.
    pub stage: Stage,
    /// Selected category.
    pub category: Option<Category>,
    /// Selected topic.
    pub topic: String,
    /// Full chat transcript.
    pub transcript: Vec<Turn>,
    /// Delivered program content, once generated.
    pub pending_content: Option<String>,
    /// Stage heading.
    pub header: String,
    /// Preset topics during topic selection.
    pub topics: Vec<String>,
    /// Overview text during confirmation.
    pub overview: Option<String>,
    /// Whether the SOS action is offered.
    pub sos_available: bool,
}

/// Project the state into a snapshot. Never generates content.
#[must_use]
pub fn render_snapshot(state: &SessionState) -> SessionSnapshot {
    let category = state.category.map_or("", Category::as_str);
    let header = match state.stage {
        Stage::InitialSelection => "What do you need today?".to_string(),
        Stage::TopicSelection => format!("Choose a Topic for Your {category}"),
        Stage::Confirmation => "Weekly Overview & Goal Setting".to_string(),
        Stage::ProgramDelivery | Stage::Chat => {
            format!("Day 1: {category} on {}", state.topic)
        }
    };

    let topics = match (state.stage, state.category) {
        (Stage::TopicSelection, Some(selected)) => selected
            .preset_topics()
            .iter()
            .map(|topic| (*topic).to_string())
            .collect(),
        _ => Vec::new(),
    };

    let overview = (state.stage == Stage::Confirmation).then(|| {
        format!(
            "You've chosen **{category}** focusing on **{}**. {WEEKLY_GOAL}",
            state.topic
        )
    });

    SessionSnapshot {
        stage: state.stage,
        category: state.category,
        topic: state.topic.clone(),
        transcript: state.transcript.full().to_vec(),
        pending_content: state.content.clone(),
        header,
        topics,
        overview,
        sos_available: state.sos_available(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let snapshot = render_snapshot(&SessionState::default());
        assert_eq!(snapshot.stage, Stage::InitialSelection);
        assert!(snapshot.topics.is_empty());
        assert!(snapshot.pending_content.is_none());
        assert!(!snapshot.sos_available);
    }

    #[test]
    fn test_topic_selection_lists_presets() {
        let state = SessionState {
            stage: Stage::TopicSelection,
            category: Some(Category::Meditation),
            ..SessionState::default()
        };
        let snapshot = render_snapshot(&state);
        assert_eq!(snapshot.header, "Choose a Topic for Your Meditation");
        assert_eq!(snapshot.topics.len(), 5);
        assert!(snapshot.topics.contains(&"God's Presence".to_string()));
    }

    #[test]
    fn test_confirmation_overview() {
        let state = SessionState {
            stage: Stage::Confirmation,
            category: Some(Category::Devotion),
            topic: "Healing".to_string(),
            ..SessionState::default()
        };
        let overview = render_snapshot(&state).overview.unwrap();
        assert!(overview.starts_with("You've chosen **Devotion** focusing on **Healing**."));
        assert!(overview.ends_with(WEEKLY_GOAL));
    }

    #[test]
    fn test_delivery_header_and_sos() {
        let state = SessionState {
            stage: Stage::ProgramDelivery,
            category: Some(Category::Accountability),
            topic: "Anger".to_string(),
            ..SessionState::default()
        };
        let snapshot = render_snapshot(&state);
        assert_eq!(snapshot.header, "Day 1: Accountability on Anger");
        assert!(snapshot.sos_available);
    }
}
