//! Heuristic text annotator: pure-Rust keyword and pattern tables standing
//! in for the external annotation service the responder can lean on.
//!
//! Coverage is French-first with an English table alongside, matching the
//! knowledge files this ships with. All heuristics are coarse: the contract
//! is best-effort assistance, never authority.

use causette_core::{Annotator, Entity, Sentiment};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}']+").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap());

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+(?:[.,]\d+)?\b").unwrap());

static PROPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\p{Lu}[\p{Ll}]+(?:\s+\p{Lu}[\p{Ll}]+)*").unwrap());

const STOPWORDS: &[&str] = &[
    // French
    "le", "la", "les", "un", "une", "des", "de", "du", "au", "aux", "et", "ou", "mais", "donc",
    "or", "ni", "car", "que", "qui", "quoi", "dont", "où", "je", "tu", "il", "elle", "on", "nous",
    "vous", "ils", "elles", "me", "te", "se", "moi", "toi", "lui", "leur", "mon", "ton", "son",
    "ma", "ta", "sa", "mes", "tes", "ses", "ce", "cet", "cette", "ces", "dans", "en", "sur",
    "sous", "avec", "sans", "pour", "par", "vers", "chez", "est", "sont", "suis", "es", "êtes",
    "sommes", "été", "être", "avoir", "ai", "as", "a", "avons", "avez", "ont", "ne", "pas",
    "plus", "très", "bien", "tout", "tous", "toute", "toutes", "y", "si", "d'un", "d'une",
    "c'est", "j'ai", "n'ai", "quel", "quelle", "quels", "quelles", "votre", "vos", "notre",
    "nos",
    // English
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "am", "i", "you", "he", "she", "it", "we",
    "they", "my", "your", "his", "her", "its", "our", "their", "this", "that", "these", "those",
    "not", "no", "do", "does", "did", "have", "has", "had", "will", "would", "can", "could",
    "what", "who", "how", "when", "where", "why", "me", "him", "them", "us", "so", "as", "very",
];

const POSITIVE_WORDS: &[&str] = &[
    // French
    "super", "génial", "merci", "excellent", "excellente", "heureux", "heureuse", "content",
    "contente", "bravo", "magnifique", "parfait", "parfaite", "aime", "adore", "beau", "belle",
    "agréable", "formidable", "sympa", "top",
    // English
    "great", "good", "love", "wonderful", "amazing", "happy", "fantastic", "awesome", "nice",
    "beautiful", "perfect", "thanks", "pleased", "delighted",
];

const NEGATIVE_WORDS: &[&str] = &[
    // French
    "mauvais", "mauvaise", "nul", "nulle", "horrible", "terrible", "déteste", "triste", "déçu",
    "déçue", "problème", "pire", "décevant", "fâché", "colère", "ennuyeux", "catastrophe",
    // English
    "bad", "awful", "hate", "sad", "angry", "disappointed", "worst", "broken", "wrong",
    "useless", "annoying", "disaster",
];

/// Maximum input length considered by [`Annotator::sentiment`], in chars.
const SENTIMENT_MAX_CHARS: usize = 512;

/// Regex-and-table annotator. Stateless and cheap to construct.
#[derive(Debug, Default)]
pub struct HeuristicAnnotator;

impl HeuristicAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Lowercased word tokens, stopwords included.
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD.find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Light suffix stripping; enough to let "greetings" meet "greeting" and
/// "vraiment" meet "vrai", not a real lemmatizer.
fn lemma(token: &str) -> String {
    let mut t = token;
    if t.len() > 3 && t.ends_with('s') && !t.ends_with("ss") && !t.ends_with("us") {
        t = &t[..t.len() - 1];
    }
    for suffix in ["ement", "ing", "ed"] {
        if let Some(stripped) = t.strip_suffix(suffix) {
            if stripped.chars().count() >= 3 {
                return stripped.to_string();
            }
        }
    }
    t.to_string()
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

impl Annotator for HeuristicAnnotator {
    fn normalize(&self, text: &str) -> Vec<String> {
        self.tokenize(text)
            .into_iter()
            .filter(|t| !is_stopword(t))
            .map(|t| lemma(&t))
            .collect()
    }

    /// Jaccard index over normalized token sets. Symmetric by construction;
    /// `None` when neither side yields a token.
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let set_a: std::collections::HashSet<String> = self.normalize(a).into_iter().collect();
        let set_b: std::collections::HashSet<String> = self.normalize(b).into_iter().collect();
        if set_a.is_empty() && set_b.is_empty() {
            return None;
        }
        let intersection = set_a.intersection(&set_b).count();
        let union = set_a.union(&set_b).count();
        Some(intersection as f32 / union as f32)
    }

    fn sentiment(&self, text: &str) -> Option<Sentiment> {
        let truncated: String = text.chars().take(SENTIMENT_MAX_CHARS).collect();
        let tokens = self.tokenize(&truncated);
        if tokens.is_empty() {
            return None;
        }
        let positive = tokens.iter().filter(|t| POSITIVE_WORDS.contains(&t.as_str())).count();
        let negative = tokens.iter().filter(|t| NEGATIVE_WORDS.contains(&t.as_str())).count();
        let (label, score) = if positive == 0 && negative == 0 {
            ("NEUTRAL", 0.5)
        } else if positive >= negative {
            ("POSITIVE", positive as f32 / (positive + negative) as f32)
        } else {
            ("NEGATIVE", negative as f32 / (positive + negative) as f32)
        };
        Some(Sentiment {
            label: label.to_string(),
            score,
        })
    }

    fn entities(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for m in EMAIL.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                label: "EMAIL".to_string(),
            });
        }
        for m in NUMBER.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                label: "NUMBER".to_string(),
            });
        }
        for m in PROPER.find_iter(text) {
            // Sentence-initial single words are usually not names; skip them
            // unless multi-word, and drop capitalized stopwords ("Je", "The").
            let span = m.as_str();
            let single_word = !span.contains(' ');
            if single_word && is_stopword(&span.to_lowercase()) {
                continue;
            }
            if single_word && m.start() == 0 {
                continue;
            }
            entities.push(Entity {
                text: span.to_string(),
                label: "MISC".to_string(),
            });
        }
        entities
    }

    /// Normalized tokens ranked by frequency, then first occurrence.
    fn keywords(&self, text: &str, limit: usize) -> Vec<String> {
        let tokens = self.normalize(text);
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (index, token) in tokens.iter().enumerate() {
            let entry = counts.entry(token.as_str()).or_insert((0, index));
            entry.0 += 1;
        }
        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(token, _, _)| token.to_string())
            .collect()
    }

    /// Coarse suffix-driven tagging over the raw token stream.
    fn pos_tags(&self, text: &str) -> Vec<(String, String)> {
        WORD.find_iter(text)
            .map(|m| {
                let token = m.as_str();
                let tag = if token.chars().all(|c| c.is_ascii_digit()) {
                    "NUM"
                } else if token.chars().next().is_some_and(|c| c.is_uppercase()) && m.start() != 0 {
                    "PROPN"
                } else if token.ends_with("ment") || token.ends_with("ly") {
                    "ADV"
                } else if ["er", "ir", "ez", "ons", "ing", "ed"]
                    .iter()
                    .any(|s| token.len() > s.len() + 2 && token.ends_with(s))
                {
                    "VERB"
                } else {
                    "NOUN"
                };
                (token.to_string(), tag.to_string())
            })
            .collect()
    }
}
