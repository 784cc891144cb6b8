//! Overlapping text chunker.
//!
//! Windows are measured in characters (Unicode scalar values) and always cut
//! on character boundaries. Inside a window the cut prefers, in order, a
//! paragraph break, a line break, a sentence end and a word gap; a hard cut is
//! used only when none of those exist past the overlap region.
//!
//! Chunks are exact slices of the source, so the corpus can be rebuilt from
//! them (see [`reassemble`]).

use serde::{Deserialize, Serialize};

use crate::guide::core::config::CorpusConfig;
use crate::guide::core::errors::AssistantResult;

/// Separators tried in order of preference. The cut lands right after the separator.
const BREAK_SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "! ", "? ", " "];

/// A bounded slice of the corpus used as a retrieval unit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of the chunk in corpus order.
    pub index: usize,
    /// Chunk text, an exact slice of the corpus.
    pub text: String,
    /// Character offset of the chunk in the corpus.
    pub start: usize,
}

impl Chunk {
    /// Character offset one past the end of the chunk.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

/// Chunking parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChunkerSettings {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Maximum characters shared by consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkerSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkerSettings {
    /// Validated settings from the corpus configuration.
    ///
    /// # Errors
    /// Returns a configuration error if `overlap >= chunk_size` or `chunk_size == 0`.
    pub fn from_config(config: &CorpusConfig) -> AssistantResult<Self> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            overlap: config.overlap,
        })
    }
}

/// Split `text` into overlapping chunks.
///
/// Callers must pass settings with `overlap < chunk_size`; out-of-range values
/// are clamped so the loop always advances.
#[must_use]
pub fn split_text(text: &str, settings: ChunkerSettings) -> Vec<Chunk> {
    let chunk_size = settings.chunk_size.max(1);
    let overlap = settings.overlap.min(chunk_size - 1);

    // bounds[p] is the byte offset of character p; the last entry is text.len().
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = bounds.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < total {
        let hard_end = (start + chunk_size).min(total);
        let end = if hard_end == total {
            total
        } else {
            find_break(text, &bounds, start + overlap + 1, hard_end).unwrap_or(hard_end)
        };

        chunks.push(Chunk {
            index: chunks.len(),
            text: text[bounds[start]..bounds[end]].to_string(),
            start,
        });

        if end == total {
            break;
        }
        start = next_start(text, &bounds, end, overlap).max(start + 1);
    }

    chunks
}

/// Rebuild the source text from consecutive chunks.
#[must_use]
pub fn reassemble(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    let mut covered: usize = 0;
    for chunk in chunks {
        let skip = covered.saturating_sub(chunk.start);
        out.extend(chunk.text.chars().skip(skip));
        covered = covered.max(chunk.end());
    }
    out
}

/// Best cut in the character range `[min_end, hard_end]`, as a character position.
fn find_break(text: &str, bounds: &[usize], min_end: usize, hard_end: usize) -> Option<usize> {
    if min_end > hard_end {
        return None;
    }
    let window = &text[bounds[min_end]..bounds[hard_end]];
    BREAK_SEPARATORS.iter().find_map(|separator| {
        window.rfind(separator).and_then(|found| {
            let byte = bounds[min_end] + found + separator.len();
            bounds.binary_search(&byte).ok()
        })
    })
}

/// Start of the next chunk: `overlap` characters back from `end`, moved forward
/// past the first whitespace in the overlap so the chunk opens on a word.
fn next_start(text: &str, bounds: &[usize], end: usize, overlap: usize) -> usize {
    let candidate = end.saturating_sub(overlap);
    if candidate == 0 || candidate >= end {
        return candidate;
    }
    let previous_is_space = text[bounds[candidate - 1]..bounds[candidate]]
        .chars()
        .all(char::is_whitespace);
    if previous_is_space {
        return candidate;
    }
    let region = &text[bounds[candidate]..bounds[end]];
    region
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .and_then(|(offset, ch)| {
            let byte = bounds[candidate] + offset + ch.len_utf8();
            bounds.binary_search(&byte).ok()
        })
        .filter(|position| *position < end)
        .unwrap_or(candidate)
}
