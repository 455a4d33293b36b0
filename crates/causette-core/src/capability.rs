//! Optional external capability interfaces (annotation and generation).
//!
//! The responder treats both capabilities as collaborators that may be
//! absent or fail per call. Annotation methods report unavailability with
//! `None` or an empty list instead of an error; generation propagates its
//! error so callers can degrade to canned responses.

use serde::{Deserialize, Serialize};

/// Sentiment of a text, as reported by an annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// e.g. "POSITIVE", "NEGATIVE", "NEUTRAL".
    pub label: String,
    /// Confidence in the range `0.0..=1.0`.
    pub score: f32,
}

/// A detected entity span with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

/// Text annotation capability: tokenization, similarity, sentiment,
/// entities, keywords, part-of-speech tags.
pub trait Annotator: Send + Sync {
    /// Normalized token form: lowercased tokens with stopwords removed and
    /// light lemmatization applied.
    fn normalize(&self, text: &str) -> Vec<String>;

    /// Symmetric similarity score in `0.0..=1.0`, or `None` when the
    /// capability cannot score this pair.
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;

    /// Sentiment label and score, or `None` when unavailable.
    fn sentiment(&self, text: &str) -> Option<Sentiment>;

    /// Named entities found in the text. Empty when none (or unavailable).
    fn entities(&self, text: &str) -> Vec<Entity>;

    /// Up to `limit` keywords, most salient first.
    fn keywords(&self, text: &str, limit: usize) -> Vec<String>;

    /// `(token, tag)` pairs over the raw token stream.
    fn pos_tags(&self, text: &str) -> Vec<(String, String)>;
}

/// Generative text capability.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Requests up to `max_new_tokens` of continuation for `prompt`.
    /// Returns candidate completions (each typically echoing the prompt).
    async fn generate(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
