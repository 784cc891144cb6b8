//! Declarative content templates, one per guided category.
//!
//! A template is an intro line and an ordered list of named sections. New
//! categories only need a new record here.

use crate::guide::core::category::Category;
use crate::guide::core::errors::{AssistantError, AssistantResult};

/// Placeholder replaced by the topic when a template is rendered.
const TOPIC_PLACEHOLDER: &str = "{topic}";

/// One named section of the generated content.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TemplateSection {
    /// Display icon.
    pub icon: &'static str,
    /// Section heading the model must emit.
    pub title: &'static str,
    /// What the section must contain.
    pub instruction: &'static str,
}

/// Structure of one category's content.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContentTemplate {
    /// Category the template belongs to.
    pub category: Category,
    /// Task statement; `{topic}` is substituted.
    pub intro: &'static str,
    /// Ordered sections.
    pub sections: &'static [TemplateSection],
}

const fn section(
    icon: &'static str,
    title: &'static str,
    instruction: &'static str,
) -> TemplateSection {
    TemplateSection {
        icon,
        title,
        instruction,
    }
}

const DEVOTION: ContentTemplate = ContentTemplate {
    category: Category::Devotion,
    intro: "Create a 5-minute daily devotional on the topic of '{topic}'.",
    sections: &[
        section("✝️", "Scripture", "Choose a relevant Bible verse."),
        section(
            "📖",
            "5-minute Reading",
            "Write a short, encouraging reflection (2-3 paragraphs) on the verse and topic.",
        ),
        section(
            "🙏",
            "Short Prayer",
            "Write a 2-3 sentence prayer related to the topic.",
        ),
        section(
            "💪",
            "Faith Declaration",
            "Write a powerful \"I am\" or \"I will\" statement.",
        ),
        section(
            "🎥",
            "Recommended Video",
            "Suggest a conceptual video topic, like \"A video on finding peace in God's promises.\"",
        ),
    ],
};

const PRAYER: ContentTemplate = ContentTemplate {
    category: Category::Prayer,
    intro: "Guide the user through a prayer on the topic of '{topic}' using the ACTS model.",
    sections: &[
        section(
            "🙌",
            "Adoration",
            "Start with a prompt to praise God for who He is.",
        ),
        section(
            "🕊️",
            "Confession",
            "Gently guide the user to confess any shortcomings related to '{topic}'.",
        ),
        section(
            "🌾",
            "Thanksgiving",
            "Prompt the user to thank God for His blessings.",
        ),
        section(
            "🤲",
            "Supplication",
            "Help the user make specific requests to God about '{topic}'.",
        ),
        section(
            "🎯",
            "Daily Prayer Focus",
            "Add a specific action point, e.g., \"Today, pray for wisdom in a difficult situation.\"",
        ),
    ],
};

const MEDITATION: ContentTemplate = ContentTemplate {
    category: Category::Meditation,
    intro: "Create a guided meditation on the topic of '{topic}'.",
    sections: &[
        section("🧘", "Scripture Focus", "Select one potent verse for meditation."),
        section(
            "🤔",
            "Meditation Prompts",
            "Provide 2-3 deep questions for reflection, like \"What does this reveal about God?\"",
        ),
        section(
            "🌬️",
            "Breathing Guide",
            "Include a simple instruction: \"Breathe deeply. Inhale for 4 seconds, hold for 4, and exhale for 4. Focus on the scripture as you breathe.\"",
        ),
    ],
};

const ACCOUNTABILITY: ContentTemplate = ContentTemplate {
    category: Category::Accountability,
    intro: "Provide strength and accountability for someone struggling with '{topic}'.",
    sections: &[
        section(
            "🛡️",
            "Scripture for Strength",
            "Choose a powerful verse about overcoming temptation or finding freedom.",
        ),
        section(
            "📢",
            "Truth Declarations",
            "Write 2-3 strong \"I am...\" statements based on scriptural truth.",
        ),
        section(
            "🔁",
            "Alternative Actions",
            "Suggest a healthy, positive action to take instead of giving in. Example: \"Instead of [vice], try [healthy action].\"",
        ),
        section(
            "🚨",
            "SOS Feature Info",
            "Remind them: \"If you need immediate help, use the 'SOS' button for urgent encouragement.\"",
        ),
    ],
};

static TEMPLATES: [ContentTemplate; 4] = [DEVOTION, PRAYER, MEDITATION, ACCOUNTABILITY];

/// Look up the template for a category.
///
/// # Errors
/// Returns `InvalidCategory` for categories without a template (`Chat`).
pub fn template_for(category: Category) -> AssistantResult<&'static ContentTemplate> {
    TEMPLATES
        .iter()
        .find(|template| template.category == category)
        .ok_or_else(|| AssistantError::InvalidCategory(category.to_string()))
}

impl ContentTemplate {
    /// Render the template into a single instruction for `topic`.
    #[must_use]
    pub fn render(&self, topic: &str) -> String {
        let mut out = String::new();
        out.push_str("You are DSCPL, a personal spiritual assistant.\n");
        out.push_str(&self.intro.replace(TOPIC_PLACEHOLDER, topic));
        out.push_str("\nFollow this exact structure, using each heading verbatim:\n");
        for section in self.sections {
            out.push_str("- **");
            out.push_str(section.icon);
            out.push(' ');
            out.push_str(section.title);
            out.push_str(":** ");
            out.push_str(&section.instruction.replace(TOPIC_PLACEHOLDER, topic));
            out.push('\n');
        }
        out
    }

    /// Section titles in order.
    pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|section| section.title)
    }
}
