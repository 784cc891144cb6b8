//! Sliding-window conversation memory.
//!
//! The full transcript is kept for display. The window only limits what is
//! handed to the synthesizer; nothing is ever evicted from the transcript.

use serde::{Deserialize, Serialize};

use crate::guide::conversation::turn::{Role, Turn};

/// Default number of user/assistant pairs in the prompting window.
pub const DEFAULT_WINDOW_PAIRS: usize = 5;

/// Append-only transcript with a bounded prompting window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
    window_pairs: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_PAIRS)
    }
}

impl ConversationMemory {
    /// Create an empty memory with a window of `window_pairs` pairs.
    #[must_use]
    pub const fn new(window_pairs: usize) -> Self {
        Self {
            turns: Vec::new(),
            window_pairs,
        }
    }

    /// Append a turn.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The most recent `pairs` pairs (at most `2 * pairs` turns), oldest first.
    ///
    /// The window always opens on a user turn, so an answer is never shown
    /// without its question.
    #[must_use]
    pub fn recent(&self, pairs: usize) -> &[Turn] {
        let keep = pairs.saturating_mul(2);
        let mut from = self.turns.len().saturating_sub(keep);
        while self
            .turns
            .get(from)
            .is_some_and(|turn| turn.role == Role::Assistant)
        {
            from += 1;
        }
        &self.turns[from..]
    }

    /// The configured prompting window.
    #[must_use]
    pub fn window(&self) -> &[Turn] {
        self.recent(self.window_pairs)
    }

    /// The entire transcript, oldest first.
    #[must_use]
    pub fn full(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of pairs in the prompting window.
    #[must_use]
    pub const fn window_pairs(&self) -> usize {
        self.window_pairs
    }

    /// Number of turns in the transcript.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(pairs: usize) -> ConversationMemory {
        let mut memory = ConversationMemory::default();
        for i in 0..pairs {
            memory.append(Turn::user(format!("question {i}")));
            memory.append(Turn::assistant(format!("answer {i}"), Vec::new()));
        }
        memory
    }

    #[test]
    fn test_recent_is_bounded_and_chronological() {
        let memory = filled(8);
        for n in 0..10 {
            let recent = memory.recent(n);
            assert!(recent.len() <= n * 2);
            assert_eq!(recent, &memory.full()[memory.len() - recent.len()..]);
        }
        let last_two = memory.recent(1);
        assert_eq!(last_two[0].text, "question 7");
        assert_eq!(last_two[1].role, Role::Assistant);
    }

    #[test]
    fn test_window_does_not_evict_transcript() {
        let memory = filled(9);
        assert_eq!(memory.window().len(), DEFAULT_WINDOW_PAIRS * 2);
        assert_eq!(memory.full().len(), 18);
        assert_eq!(memory.full()[0].text, "question 0");
        assert_eq!(memory.window()[0].text, "question 4");
    }

    #[test]
    fn test_window_after_unanswered_turn_starts_on_user() {
        let mut memory = filled(3);
        memory.append(Turn::user("failed question"));
        memory.append(Turn::user("question 3"));
        memory.append(Turn::assistant("answer 3", Vec::new()));

        let recent = memory.recent(2);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].role, Role::User);
        assert_eq!(recent[0].text, "failed question");
        assert_eq!(recent[2].text, "answer 3");
        assert!(memory.window().first().is_some_and(|turn| turn.role == Role::User));
    }

    #[test]
    fn test_recent_on_short_transcript() {
        let mut memory = ConversationMemory::new(3);
        memory.append(Turn::user("only one"));
        assert_eq!(memory.window().len(), 1);
        assert!(ConversationMemory::default().recent(5).is_empty());
    }
}
