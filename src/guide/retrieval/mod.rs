//! Retrieval over the corpus index.

pub mod search;

pub use search::{DEFAULT_TOP_K, ScoredChunk, cosine_similarity, query, query_scored, rank};
