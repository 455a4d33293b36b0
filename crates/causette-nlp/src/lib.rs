//! Concrete capability implementations for the responder.
//!
//! [`HeuristicAnnotator`] is a pure-Rust stand-in for external annotation
//! services (tokenization, similarity, sentiment, entities). [`TextGenerator`]
//! mirrors an external completion service with a mock mode and a live HTTP
//! mode.

mod analyzer;
mod generator;

pub use analyzer::HeuristicAnnotator;
pub use generator::{GenMode, TextGenerator};
