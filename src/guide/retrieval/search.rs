//! Nearest-chunk retrieval over the corpus index.

use std::cmp::Ordering;

use tracing::debug;

use crate::guide::core::errors::AssistantResult;
use crate::guide::corpus::chunker::Chunk;
use crate::guide::corpus::embedder::Embedder;
use crate::guide::corpus::index::CorpusIndex;

/// Default number of chunks returned by a query.
pub const DEFAULT_TOP_K: usize = 4;

/// Retrieved chunk with its similarity to the query.
#[derive(Clone, Debug)]
pub struct ScoredChunk {
    /// Cosine similarity in [-1, 1].
    pub similarity: f64,
    /// Retrieved chunk.
    pub chunk: Chunk,
}

/// Return the `k` chunks most similar to `text`, best first.
///
/// # Errors
/// Returns an error if the query cannot be embedded.
pub async fn query(
    index: &CorpusIndex,
    embedder: &dyn Embedder,
    text: &str,
    k: usize,
) -> AssistantResult<Vec<Chunk>> {
    let scored = query_scored(index, embedder, text, k).await?;
    Ok(scored.into_iter().map(|hit| hit.chunk).collect())
}

/// Same as [`query`] but keeps the similarity scores.
///
/// An empty index returns an empty result without calling the embedder.
///
/// # Errors
/// Returns an error if the query cannot be embedded.
pub async fn query_scored(
    index: &CorpusIndex,
    embedder: &dyn Embedder,
    text: &str,
    k: usize,
) -> AssistantResult<Vec<ScoredChunk>> {
    if index.is_empty() || k == 0 {
        return Ok(Vec::new());
    }

    let embedding = embedder.embed_text(text).await?;
    let hits = rank(index, &embedding.vec, k);
    debug!(
        "Retrieved {} chunks (best similarity {:?})",
        hits.len(),
        hits.first().map(|hit| hit.similarity)
    );
    Ok(hits)
}

/// Score every entry against `query_vector` and keep the top `k`.
///
/// Ties are broken by ascending chunk index.
#[must_use]
pub fn rank(index: &CorpusIndex, query_vector: &[f64], k: usize) -> Vec<ScoredChunk> {
    let mut scored: Vec<(f64, usize)> = index
        .entries()
        .iter()
        .enumerate()
        .map(|(position, entry)| (cosine_similarity(query_vector, &entry.vector), position))
        .collect();

    scored.sort_by(|a, b| match b.0.total_cmp(&a.0) {
        Ordering::Equal => index.entries()[a.1]
            .chunk
            .index
            .cmp(&index.entries()[b.1].chunk.index),
        other => other,
    });
    scored.truncate(k);

    scored
        .into_iter()
        .map(|(similarity, position)| ScoredChunk {
            similarity,
            chunk: index.entries()[position].chunk.clone(),
        })
        .collect()
}

/// Cosine similarity; 0.0 when lengths differ or either vector has zero magnitude.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::guide::corpus::chunker::ChunkerSettings;
    use crate::guide::testing::FakeEmbedder;

    const CORPUS: &str = "Peace I leave with you, my peace I give unto you.\n\n\
        Blessed are the peacemakers, for they shall be called sons of God.\n\n\
        In the beginning God created the heaven and the earth.\n\n\
        The earth was without form, and void; and darkness was upon the deep.\n\n\
        Love is patient, love is kind. It does not envy, it does not boast.\n\n\
        Be still, and know that I am God.";

    async fn build_index(embedder: &FakeEmbedder) -> CorpusIndex {
        let settings = ChunkerSettings {
            chunk_size: 80,
            overlap: 10,
        };
        CorpusIndex::build(CORPUS, settings, embedder, 4).await.unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0], &[1.0, 1.0]).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_query_returns_at_most_k_sorted_unique() {
        let embedder = FakeEmbedder::default();
        let index = build_index(&embedder).await;
        for k in [1, 2, 4, 50] {
            let hits = query_scored(&index, &embedder, "peace", k).await.unwrap();
            assert!(hits.len() <= k);
            assert!(hits.windows(2).all(|w| w[0].similarity >= w[1].similarity));
            let unique: HashSet<usize> = hits.iter().map(|h| h.chunk.index).collect();
            assert_eq!(unique.len(), hits.len());
        }
    }

    #[tokio::test]
    async fn test_query_finds_relevant_chunk_first() {
        let embedder = FakeEmbedder::default();
        let index = build_index(&embedder).await;
        let chunks = query(&index, &embedder, "love is patient and kind", 2)
            .await
            .unwrap();
        assert!(chunks.iter().any(|chunk| chunk.text.contains("patient")));
    }

    #[tokio::test]
    async fn test_empty_index_returns_nothing_without_embedding() {
        let embedder = FakeEmbedder::default();
        let index = CorpusIndex::default();
        let hits = query(&index, &embedder, "peace", 4).await.unwrap();
        assert!(hits.is_empty());
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_ties_break_by_chunk_order() {
        let embedder = FakeEmbedder::default();
        let index = build_index(&embedder).await;
        let zero = vec![0.0; embedder.ndims()];
        let hits = rank(&index, &zero, 3);
        let order: Vec<usize> = hits.iter().map(|h| h.chunk.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
