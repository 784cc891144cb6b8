//! Corpus chunking, embedding and indexing.

pub mod chunker;
pub mod embedder;
pub mod index;

pub use chunker::{Chunk, ChunkerSettings, reassemble, split_text};
pub use embedder::{EmbedFuture, Embedder, RigEmbedder, gemini_embedder};
pub use index::{CorpusIndex, IndexEntry};
