//! JSON-backed knowledge base: intents with trigger patterns and canned
//! responses, kept in file order because first-match wins.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Reserved intent name used as fallback when nothing matches.
pub const DEFAULT_INTENT: &str = "default";

/// One intent: trigger patterns and candidate responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentRecord {
    /// Substrings that trigger this intent (matched case-insensitively).
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Candidate replies; one is chosen uniformly at random.
    #[serde(default)]
    pub responses: Vec<String>,
}

/// Error loading the knowledge file. Both variants are recoverable: callers
/// degrade to an empty knowledge base.
#[derive(Debug)]
pub enum KnowledgeError {
    Missing { path: PathBuf, source: io::Error },
    Malformed { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeError::Missing { path, source } => {
                write!(f, "cannot read knowledge file {}: {}", path.display(), source)
            }
            KnowledgeError::Malformed { path, source } => {
                write!(f, "invalid JSON in knowledge file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for KnowledgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KnowledgeError::Missing { source, .. } => Some(source),
            KnowledgeError::Malformed { source, .. } => Some(source),
        }
    }
}

/// Immutable mapping from intent name to record, in file order.
///
/// Intent names are unique (JSON object keys). Duplicate pattern lists
/// across intents are permitted; the first intent in file order wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    intents: IndexMap<String, IntentRecord>,
}

impl KnowledgeBase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the knowledge file:
    /// `{ "<intent>": { "patterns": [...], "responses": [...] }, ... }`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| KnowledgeError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the knowledge file, degrading to an empty base on a missing or
    /// malformed file. The condition is logged, not fatal.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(kb) => kb,
            Err(e) => {
                tracing::warn!("knowledge base unavailable, starting empty: {e}");
                Self::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn get(&self, name: &str) -> Option<&IntentRecord> {
        self.intents.get(name)
    }

    /// Intents in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IntentRecord)> {
        self.intents.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Responses of the fallback intent; empty when it is absent.
    pub fn default_responses(&self) -> &[String] {
        self.get(DEFAULT_INTENT)
            .map(|r| r.responses.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "greetings": { "patterns": ["bonjour", "salut"], "responses": ["Salut !"] },
        "thanks": { "patterns": ["merci"], "responses": ["De rien !", "Avec plaisir !"] },
        "default": { "responses": ["Je ne comprends pas."] }
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_valid_file_preserves_order_and_content() {
        let file = write_temp(SAMPLE);
        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.len(), 3);
        let names: Vec<&str> = kb.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["greetings", "thanks", "default"]);
        let greetings = kb.get("greetings").unwrap();
        assert_eq!(greetings.patterns, vec!["bonjour", "salut"]);
        assert_eq!(greetings.responses, vec!["Salut !"]);
        assert_eq!(kb.default_responses(), ["Je ne comprends pas."]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let file = write_temp(r#"{ "default": { "responses": ["?"] }, "bare": {} }"#);
        let kb = KnowledgeBase::load(file.path()).unwrap();
        let bare = kb.get("bare").unwrap();
        assert!(bare.patterns.is_empty());
        assert!(bare.responses.is_empty());
    }

    #[test]
    fn missing_file_is_a_recoverable_error() {
        let err = KnowledgeBase::load("no/such/file.json").unwrap_err();
        assert!(matches!(err, KnowledgeError::Missing { .. }));
        assert!(KnowledgeBase::load_or_empty("no/such/file.json").is_empty());
    }

    #[test]
    fn malformed_file_is_a_recoverable_error() {
        let file = write_temp("{ not json at all");
        let err = KnowledgeBase::load(file.path()).unwrap_err();
        assert!(matches!(err, KnowledgeError::Malformed { .. }));
        assert!(KnowledgeBase::load_or_empty(file.path()).is_empty());
    }

    #[test]
    fn default_responses_empty_when_fallback_absent() {
        let file = write_temp(r#"{ "greetings": { "patterns": ["bonjour"], "responses": ["Salut !"] } }"#);
        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert!(kb.default_responses().is_empty());
    }
}
