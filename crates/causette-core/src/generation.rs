//! Prompt formatting and reply extraction around a generative capability.

use crate::capability::Generator;
use rand::seq::SliceRandom;

/// Token budget for one generated reply.
pub const MAX_NEW_TOKENS: usize = 50;

const BOT_MARKER: &str = "Bot:";

/// Fixed replies used when the generator produced nothing usable.
pub const GENERATION_PLACEHOLDERS: [&str; 2] = [
    "Je ne suis pas sûr de comprendre. Pouvez-vous reformuler ?",
    "Hmm, je n'ai pas de réponse à cela pour le moment.",
];

/// Builds the `"User: <text>\nBot:"` prompt, requests a continuation and
/// extracts the text after the `Bot:` marker up to the first newline.
///
/// A missing marker, an empty candidate list or an empty extraction yield
/// one of [`GENERATION_PLACEHOLDERS`]. Transport errors from the generator
/// are propagated so callers can degrade to canned responses.
pub async fn generated_reply(
    generator: &dyn Generator,
    user_text: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let prompt = format!("User: {user_text}\nBot:");
    let candidates = generator.generate(&prompt, MAX_NEW_TOKENS).await?;
    Ok(extract_reply(candidates.first().map(String::as_str)))
}

fn extract_reply(candidate: Option<&str>) -> String {
    let extracted = candidate
        .and_then(|text| text.find(BOT_MARKER).map(|i| &text[i + BOT_MARKER.len()..]))
        .map(|rest| rest.lines().next().unwrap_or("").trim())
        .unwrap_or("");
    if extracted.is_empty() {
        placeholder()
    } else {
        extracted.to_string()
    }
}

fn placeholder() -> String {
    GENERATION_PLACEHOLDERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GENERATION_PLACEHOLDERS[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Generator;

    /// Generator stub that returns fixed candidates (or a fixed error).
    struct Canned {
        candidates: Vec<String>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Generator for Canned {
        async fn generate(
            &self,
            _prompt: &str,
            _max_new_tokens: usize,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            if self.fail {
                return Err("service down".into());
            }
            Ok(self.candidates.clone())
        }
    }

    fn is_placeholder(reply: &str) -> bool {
        GENERATION_PLACEHOLDERS.contains(&reply)
    }

    #[tokio::test]
    async fn extracts_text_after_marker_up_to_first_newline() {
        let generator = Canned {
            candidates: vec!["User: salut\nBot: Bonjour à vous !\nUser: encore".into()],
            fail: false,
        };
        let reply = generated_reply(&generator, "salut").await.unwrap();
        assert_eq!(reply, "Bonjour à vous !");
    }

    #[tokio::test]
    async fn missing_marker_yields_a_placeholder() {
        let generator = Canned {
            candidates: vec!["no marker in this continuation".into()],
            fail: false,
        };
        let reply = generated_reply(&generator, "salut").await.unwrap();
        assert!(is_placeholder(&reply));
    }

    #[tokio::test]
    async fn empty_candidate_list_yields_a_placeholder() {
        let generator = Canned { candidates: vec![], fail: false };
        let reply = generated_reply(&generator, "salut").await.unwrap();
        assert!(is_placeholder(&reply));
    }

    #[tokio::test]
    async fn empty_extraction_yields_a_placeholder() {
        let generator = Canned {
            candidates: vec!["User: salut\nBot:   \nUser:".into()],
            fail: false,
        };
        let reply = generated_reply(&generator, "salut").await.unwrap();
        assert!(is_placeholder(&reply));
    }

    #[tokio::test]
    async fn generator_errors_are_propagated() {
        let generator = Canned { candidates: vec![], fail: true };
        assert!(generated_reply(&generator, "salut").await.is_err());
    }
}
