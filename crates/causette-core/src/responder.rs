//! Intent resolution and reply selection.

use crate::capability::{Annotator, Generator};
use crate::generation::generated_reply;
use crate::knowledge::{KnowledgeBase, DEFAULT_INTENT};
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Reply to empty or whitespace-only input.
pub const EMPTY_INPUT_REPLY: &str = "Je n'ai rien reçu. Pouvez-vous répéter ?";

/// Last line of defense when even the fallback intent has no responses.
pub const UNKNOWN_REPLY: &str = "Je ne sais pas comment répondre à cela.";

/// Minimum similarity score for an annotator-assisted match.
pub const SIMILARITY_THRESHOLD: f32 = 0.7;

/// Per-call options for [`Responder::respond`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyOptions {
    /// Replace canned responses with generated text (when a generator is present).
    pub generate: bool,
    /// Append the analysis block (when an annotator is present).
    pub analyze: bool,
}

/// Returns the first intent (in knowledge-base order, excluding the
/// fallback) with a pattern that is a case-insensitive substring of the
/// normalized input. `None` means the fallback intent applies.
///
/// First intent in file order wins on overlapping patterns; this
/// order-dependent policy is deliberate.
pub fn resolve_intent<'a>(kb: &'a KnowledgeBase, normalized: &str) -> Option<&'a str> {
    for (name, record) in kb.iter() {
        if name == DEFAULT_INTENT {
            continue;
        }
        if record
            .patterns
            .iter()
            .any(|p| normalized.contains(&p.to_lowercase()))
        {
            return Some(name);
        }
    }
    None
}

/// Annotator-assisted resolution, tried before plain substring matching.
///
/// First pass: a pattern matches when all of its normalized tokens appear in
/// the input's normalized tokens, in the same first-wins order as the plain
/// scan. Second pass: the best similarity score over all patterns, accepted
/// only strictly above [`SIMILARITY_THRESHOLD`].
pub fn resolve_intent_assisted<'a>(
    annotator: &dyn Annotator,
    kb: &'a KnowledgeBase,
    normalized: &str,
) -> Option<&'a str> {
    let input_tokens = annotator.normalize(normalized);
    if input_tokens.is_empty() {
        return None;
    }

    for (name, record) in kb.iter() {
        if name == DEFAULT_INTENT {
            continue;
        }
        for pattern in &record.patterns {
            let pattern_tokens = annotator.normalize(pattern);
            if !pattern_tokens.is_empty()
                && pattern_tokens.iter().all(|t| input_tokens.contains(t))
            {
                return Some(name);
            }
        }
    }

    let mut best: Option<(&str, f32)> = None;
    for (name, record) in kb.iter() {
        if name == DEFAULT_INTENT {
            continue;
        }
        for pattern in &record.patterns {
            if let Some(score) = annotator.similarity(normalized, pattern) {
                if best.map_or(true, |(_, b)| score > b) {
                    best = Some((name, score));
                }
            }
        }
    }
    best.filter(|(_, score)| *score > SIMILARITY_THRESHOLD)
        .map(|(name, _)| name)
}

/// Produces a reply string for raw user text.
///
/// The knowledge base is immutable after construction; capabilities are
/// injected explicitly and every capability call degrades gracefully.
pub struct Responder {
    kb: KnowledgeBase,
    annotator: Option<Arc<dyn Annotator>>,
    generator: Option<Arc<dyn Generator>>,
}

impl Responder {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb,
            annotator: None,
            generator: None,
        }
    }

    pub fn with_annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Produces a reply. Never fails: generation errors fall back to the
    /// canned path for that call only, and the fixed apology strings cover
    /// every empty corner of the knowledge base.
    pub async fn respond(&self, input: &str, opts: &ReplyOptions) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return EMPTY_INPUT_REPLY.to_string();
        }

        if opts.generate {
            if let Some(generator) = &self.generator {
                match generated_reply(generator.as_ref(), trimmed).await {
                    Ok(reply) => return self.with_analysis(trimmed, reply, opts),
                    Err(e) => {
                        tracing::debug!("generation failed, using canned responses: {e}");
                    }
                }
            }
        }

        let reply = self.canned_reply(trimmed);
        self.with_analysis(trimmed, reply, opts)
    }

    fn resolve(&self, normalized: &str) -> Option<&str> {
        if let Some(annotator) = &self.annotator {
            if let Some(name) = resolve_intent_assisted(annotator.as_ref(), &self.kb, normalized) {
                return Some(name);
            }
        }
        resolve_intent(&self.kb, normalized)
    }

    fn canned_reply(&self, trimmed: &str) -> String {
        let normalized = trimmed.to_lowercase();
        if let Some(name) = self.resolve(&normalized) {
            if let Some(record) = self.kb.get(name) {
                if let Some(reply) = record.responses.choose(&mut rand::thread_rng()) {
                    return reply.clone();
                }
            }
        }
        match self.kb.default_responses().choose(&mut rand::thread_rng()) {
            Some(reply) => reply.clone(),
            None => UNKNOWN_REPLY.to_string(),
        }
    }

    fn with_analysis(&self, input: &str, reply: String, opts: &ReplyOptions) -> String {
        if !opts.analyze {
            return reply;
        }
        let Some(annotator) = &self.annotator else {
            return reply;
        };
        let block = analysis_block(annotator.as_ref(), input);
        if block.is_empty() {
            reply
        } else {
            format!("{reply}\n{block}")
        }
    }
}

/// Human-readable analysis of the user input: sentiment, entities, keywords.
/// Empty string when the annotator produced nothing.
fn analysis_block(annotator: &dyn Annotator, input: &str) -> String {
    let mut lines = Vec::new();
    if let Some(sentiment) = annotator.sentiment(input) {
        lines.push(format!(
            "  Sentiment : {} ({:.2})",
            sentiment.label, sentiment.score
        ));
    }
    let entities = annotator.entities(input);
    if !entities.is_empty() {
        let list = entities
            .iter()
            .map(|e| format!("{} ({})", e.text, e.label))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  Entités : {list}"));
    }
    let keywords = annotator.keywords(input, 5);
    if !keywords.is_empty() {
        lines.push(format!("  Mots-clés : {}", keywords.join(", ")));
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("[Analyse]\n{}", lines.join("\n"))
    }
}
