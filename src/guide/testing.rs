//! Deterministic provider doubles for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rig::embeddings::Embedding;

use crate::guide::core::errors::{AssistantError, AssistantResult};
use crate::guide::corpus::embedder::{EmbedFuture, Embedder};
use crate::guide::generation::model::{GenerateFuture, GenerationRequest, TextGenerator};

const FAKE_NDIMS: usize = 256;

const STOPWORDS: [&str; 16] = [
    "the", "and", "what", "does", "say", "about", "that", "with", "unto", "you", "for", "not",
    "was", "are", "they", "upon",
];

/// Bag-of-words hashing embedder.
pub struct FakeEmbedder {
    calls: AtomicUsize,
    fail_after: Option<usize>,
}

impl Default for FakeEmbedder {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_after: None,
        }
    }
}

impl FakeEmbedder {
    /// Succeeds for `calls` requests, then fails every request.
    pub fn failing_after(calls: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_after: Some(calls),
        }
    }

    /// Number of provider requests made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> AssistantResult<()> {
        let previous = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_after {
            Some(limit) if previous >= limit => Err(AssistantError::EmbeddingProvider(
                "quota exceeded".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn vectorize(text: &str) -> Embedding {
        let mut vec = vec![0.0; FAKE_NDIMS];
        for word in text
            .split(|ch: char| !ch.is_alphanumeric())
            .map(str::to_lowercase)
            .filter(|word| word.len() > 2 && !STOPWORDS.contains(&word.as_str()))
        {
            let bucket = word
                .bytes()
                .fold(2_166_136_261_u32, |hash, byte| {
                    (hash ^ u32::from(byte)).wrapping_mul(16_777_619)
                }) as usize
                % FAKE_NDIMS;
            vec[bucket] += 1.0;
        }
        Embedding {
            document: text.to_string(),
            vec,
        }
    }
}

impl Embedder for FakeEmbedder {
    fn embed_text(&self, text: &str) -> EmbedFuture<'_, AssistantResult<Embedding>> {
        let text = text.to_string();
        Box::pin(async move {
            self.record_call()?;
            Ok(Self::vectorize(&text))
        })
    }

    fn embed_texts(&self, texts: Vec<String>) -> EmbedFuture<'_, AssistantResult<Vec<Embedding>>> {
        Box::pin(async move {
            self.record_call()?;
            Ok(texts.iter().map(|text| Self::vectorize(text)).collect())
        })
    }

    fn ndims(&self) -> usize {
        FAKE_NDIMS
    }
}

enum Reply {
    Echo,
    Fixed(String),
    Fail,
}

/// Scripted text generator that records its requests.
pub struct FakeGenerator {
    reply: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the prompt as the response.
    pub fn echo() -> Self {
        Self::with_reply(Reply::Echo)
    }

    /// Returns `text` for every request.
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Fixed(text.to_string()))
    }

    /// Fails every request.
    pub fn failing() -> Self {
        Self::with_reply(Reply::Fail)
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }

    /// Most recent request.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests
            .lock()
            .ok()
            .and_then(|requests| requests.last().cloned())
    }
}

impl TextGenerator for FakeGenerator {
    fn generate(&self, request: GenerationRequest) -> GenerateFuture<'_, AssistantResult<String>> {
        Box::pin(async move {
            let prompt = request.prompt.clone();
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(request);
            }
            match &self.reply {
                Reply::Echo => Ok(prompt),
                Reply::Fixed(text) => Ok(text.clone()),
                Reply::Fail => Err(AssistantError::Generation(
                    "provider unavailable".to_string(),
                )),
            }
        })
    }
}
