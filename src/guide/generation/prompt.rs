//! Grounded chat prompt construction and budget enforcement.

use crate::guide::conversation::turn::{Role, Turn};
use crate::guide::corpus::chunker::Chunk;

/// System instruction identifying the assistant persona.
pub const PERSONA_PREAMBLE: &str = "You are DSCPL, a personal spiritual assistant. \
Your goal is to be a supportive and encouraging guide for the user on their spiritual journey. \
You are warm, empathetic, and wise. You can talk about faith, life challenges, or just be a listening ear. \
Ground your responses in principles of Christian faith when appropriate, but maintain a conversational \
and non-judgmental tone. When the scripture context below is relevant, quote it and cite it; \
do not invent verses.";

/// Prompt parts before formatting.
#[derive(Clone, Debug)]
pub struct PromptParts {
    /// Retrieved grounding chunks, best first.
    pub context: Vec<Chunk>,
    /// Recent conversation window, oldest first.
    pub history: Vec<Turn>,
    /// Current user question.
    pub question: String,
}

impl PromptParts {
    /// Approximate the byte length of the prompt, for preallocation.
    #[must_use]
    pub fn estimate_len(&self) -> usize {
        let mut total = "[SCRIPTURE_CONTEXT]\n[CONVERSATION]\n[QUESTION]\n".len();
        total += self
            .context
            .iter()
            .map(|chunk| chunk.text.len() + 16)
            .sum::<usize>();
        total += self
            .history
            .iter()
            .map(|turn| turn.text.len() + 14)
            .sum::<usize>();
        total + self.question.len() + 1
    }
}

/// Build a deterministic prompt block from prepared parts.
#[must_use]
pub fn build_prompt_block(parts: &PromptParts) -> String {
    let mut out = String::with_capacity(parts.estimate_len());

    out.push_str("[SCRIPTURE_CONTEXT]\n");
    for chunk in &parts.context {
        out.push_str("* (passage ");
        out.push_str(&chunk.index.to_string());
        out.push_str(") ");
        out.push_str(chunk.text.trim());
        out.push('\n');
    }

    out.push_str("[CONVERSATION]\n");
    for turn in &parts.history {
        render_turn(&mut out, turn);
    }

    out.push_str("[QUESTION]\n");
    out.push_str(&parts.question);
    out.push('\n');

    out
}

/// Enforce the prompt budget.
///
/// Drops the lowest-ranked context chunks first, then the oldest history
/// turns. The budget counts characters, not bytes. The question is never
/// trimmed, so the result can still exceed `max_chars` when the question
/// alone is larger.
#[must_use]
pub fn enforce_budget(mut parts: PromptParts, max_chars: usize) -> PromptParts {
    while prompt_chars(&parts) > max_chars {
        if !parts.context.is_empty() {
            parts.context.pop();
            continue;
        }

        if !parts.history.is_empty() {
            parts.history.remove(0);
            continue;
        }

        break;
    }

    parts
}

/// Character count of the rendered prompt block.
#[must_use]
pub fn prompt_chars(parts: &PromptParts) -> usize {
    build_prompt_block(parts).chars().count()
}

fn render_turn(out: &mut String, turn: &Turn) {
    let role = match turn.role {
        Role::User => "User",
        Role::Assistant => "Assistant",
    };
    out.push_str("- ");
    out.push_str(role);
    out.push_str(": ");
    out.push_str(&turn.text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, text: &str) -> Chunk {
        Chunk {
            index,
            text: text.to_string(),
            start: 0,
        }
    }

    fn parts() -> PromptParts {
        PromptParts {
            context: vec![
                chunk(3, "Peace I leave with you."),
                chunk(9, "Let not your heart be troubled."),
            ],
            history: vec![
                Turn::user("I feel anxious."),
                Turn::assistant("I am here with you.", Vec::new()),
            ],
            question: "What does the Bible say about peace?".to_string(),
        }
    }

    #[test]
    fn test_block_sections_in_order() {
        let block = build_prompt_block(&parts());
        let context = block.find("[SCRIPTURE_CONTEXT]").unwrap();
        let conversation = block.find("[CONVERSATION]").unwrap();
        let question = block.find("[QUESTION]").unwrap();
        assert!(context < conversation && conversation < question);
        assert!(block.contains("* (passage 3) Peace I leave with you."));
        assert!(block.contains("- User: I feel anxious."));
        assert!(block.contains("- Assistant: I am here with you."));
        assert!(block.ends_with("What does the Bible say about peace?\n"));
    }

    #[test]
    fn test_budget_drops_context_before_history() {
        let full = prompt_chars(&parts());
        let trimmed = enforce_budget(parts(), full - 5);
        assert_eq!(trimmed.context.len(), 1);
        assert_eq!(trimmed.context[0].index, 3);
        assert_eq!(trimmed.history.len(), 2);
    }

    #[test]
    fn test_budget_counts_characters_not_bytes() {
        let accented = PromptParts {
            context: vec![chunk(1, "Béni soit l'Éternel, qui a entendu ma prière.")],
            history: Vec::new(),
            question: "Où trouver la paix ?".to_string(),
        };
        let chars = prompt_chars(&accented);
        assert!(build_prompt_block(&accented).len() > chars);
        let kept = enforce_budget(accented, chars);
        assert_eq!(kept.context.len(), 1);
    }

    #[test]
    fn test_budget_never_drops_question() {
        let trimmed = enforce_budget(parts(), 1);
        assert!(trimmed.context.is_empty());
        assert!(trimmed.history.is_empty());
        assert_eq!(trimmed.question, "What does the Bible say about peace?");
    }
}
