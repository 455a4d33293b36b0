//! causette-core: rule-based conversational responder.
//!
//! The knowledge base maps intent names to trigger patterns and canned
//! responses. The responder resolves user text to an intent (plain substring
//! scan, optionally assisted by an annotation capability) and picks one of
//! the intent's responses at random. Annotation and generation are optional
//! capabilities injected explicitly; every capability call is fail-soft.

mod capability;
mod generation;
mod knowledge;
mod responder;
mod shared;

pub use capability::{Annotator, Entity, Generator, Sentiment};
pub use generation::{generated_reply, GENERATION_PLACEHOLDERS, MAX_NEW_TOKENS};
pub use knowledge::{IntentRecord, KnowledgeBase, KnowledgeError, DEFAULT_INTENT};
pub use responder::{
    resolve_intent, resolve_intent_assisted, Responder, ReplyOptions, EMPTY_INPUT_REPLY,
    SIMILARITY_THRESHOLD, UNKNOWN_REPLY,
};
pub use shared::BotConfig;
