//! In-memory corpus index: chunks paired with their embedding vectors.

use std::path::Path;

use tracing::{debug, info};

use crate::guide::core::errors::{AssistantError, AssistantResult};
use crate::guide::corpus::chunker::{Chunk, ChunkerSettings, split_text};
use crate::guide::corpus::embedder::Embedder;

/// A chunk and the vector it was embedded to.
#[derive(Clone, Debug)]
pub struct IndexEntry {
    /// Corpus chunk.
    pub chunk: Chunk,
    /// Embedding vector.
    pub vector: Vec<f64>,
}

/// Append-only collection of embedded chunks, read-only once built.
#[derive(Clone, Debug, Default)]
pub struct CorpusIndex {
    entries: Vec<IndexEntry>,
    ndims: usize,
}

impl CorpusIndex {
    /// Build an index from raw corpus text.
    ///
    /// Embeds chunks in batches of `batch_size`. Any failed batch aborts the
    /// whole build.
    ///
    /// # Errors
    /// Returns `EmbeddingProvider` if any batch fails or returns the wrong
    /// number of vectors.
    pub async fn build(
        corpus_text: &str,
        settings: ChunkerSettings,
        embedder: &dyn Embedder,
        batch_size: usize,
    ) -> AssistantResult<Self> {
        let chunks = split_text(corpus_text, settings);
        info!(
            "Indexing corpus: {} chars into {} chunks",
            corpus_text.len(),
            chunks.len()
        );

        let mut index = Self {
            entries: Vec::with_capacity(chunks.len()),
            ndims: embedder.ndims(),
        };

        for batch in chunks.chunks(batch_size.max(1)) {
            let texts: Vec<String> = batch.iter().map(|chunk| chunk.text.clone()).collect();
            let embeddings = embedder.embed_texts(texts).await?;
            if embeddings.len() != batch.len() {
                return Err(AssistantError::EmbeddingProvider(format!(
                    "expected {} vectors, got {}",
                    batch.len(),
                    embeddings.len()
                )));
            }
            for (chunk, embedding) in batch.iter().zip(embeddings) {
                index.push(chunk.clone(), embedding.vec)?;
            }
            debug!("Embedded {}/{} chunks", index.len(), chunks.len());
        }

        info!("Corpus index ready with {} entries", index.len());
        Ok(index)
    }

    /// Read a corpus file and build an index from it.
    ///
    /// # Errors
    /// Returns `CorpusUnavailable` if the file cannot be read, or the errors of [`Self::build`].
    pub async fn build_from_path(
        path: &Path,
        settings: ChunkerSettings,
        embedder: &dyn Embedder,
        batch_size: usize,
    ) -> AssistantResult<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|source| {
            AssistantError::CorpusUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::build(&text, settings, embedder, batch_size).await
    }

    fn push(&mut self, chunk: Chunk, vector: Vec<f64>) -> AssistantResult<()> {
        if vector.is_empty() {
            return Err(AssistantError::EmbeddingProvider(format!(
                "empty vector for chunk {}",
                chunk.index
            )));
        }
        if self.ndims != 0 && vector.len() != self.ndims {
            return Err(AssistantError::EmbeddingProvider(format!(
                "vector for chunk {} has {} dims, expected {}",
                chunk.index,
                vector.len(),
                self.ndims
            )));
        }
        self.entries.push(IndexEntry { chunk, vector });
        Ok(())
    }

    /// Indexed entries in corpus order.
    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of indexed chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector dimensionality expected by the index.
    #[must_use]
    pub const fn ndims(&self) -> usize {
        self.ndims
    }
}
