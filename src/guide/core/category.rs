//! Activity categories offered on the main menu.
//!
//! The four guided categories each have a content template and a list of
//! preset topics. `Chat` is the "Just Chat" entry: it skips topic selection
//! and has no template.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Menu category selected by the user.
///
/// Deserializes from either the name or the menu label, case-insensitively.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    /// Daily devotion.
    Devotion,
    /// Daily prayer (ACTS model).
    Prayer,
    /// Daily meditation.
    Meditation,
    /// Daily accountability, with the SOS action.
    Accountability,
    /// "Just Chat": straight to the chat loop.
    Chat,
}

impl Category {
    /// Every category in menu order.
    pub const ALL: [Self; 5] = [
        Self::Devotion,
        Self::Prayer,
        Self::Meditation,
        Self::Accountability,
        Self::Chat,
    ];

    /// Stable string form, also used in prompts and headers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Devotion => "Devotion",
            Self::Prayer => "Prayer",
            Self::Meditation => "Meditation",
            Self::Accountability => "Accountability",
            Self::Chat => "Chat",
        }
    }

    /// Menu label shown for the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Devotion => "Daily Devotion",
            Self::Prayer => "Daily Prayer",
            Self::Meditation => "Daily Meditation",
            Self::Accountability => "Daily Accountability",
            Self::Chat => "Just Chat",
        }
    }

    /// Whether this category goes through topic selection and content delivery.
    #[must_use]
    pub const fn is_guided(self) -> bool {
        !matches!(self, Self::Chat)
    }

    /// Preset topics offered during topic selection.
    #[must_use]
    pub const fn preset_topics(self) -> &'static [&'static str] {
        match self {
            Self::Devotion => &[
                "Dealing with Stress",
                "Overcoming Fear",
                "Conquering Depression",
                "Relationships",
                "Healing",
                "Purpose & Calling",
                "Anxiety",
            ],
            Self::Prayer => &[
                "Personal Growth",
                "Healing",
                "Family/Friends",
                "Forgiveness",
                "Finances",
                "Work/Career",
            ],
            Self::Meditation => &["Peace", "God's Presence", "Strength", "Wisdom", "Faith"],
            Self::Accountability => &[
                "Pornography",
                "Alcohol",
                "Drugs",
                "Lust",
                "Addiction",
                "Laziness",
                "Anger",
                "Gossip",
            ],
            Self::Chat => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| {
                category.as_str().eq_ignore_ascii_case(&normalized)
                    || category.label().eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| value.to_string())
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse()
            .map_err(|unknown| format!("unknown category {unknown:?}"))
    }
}
