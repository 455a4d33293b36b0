//! Mock/live text generation behind the [`Generator`] capability.
//!
//! Mirrors an external completion service: mock mode returns a deterministic
//! continuation (prompt echoed, `Bot:` marker preserved); live mode posts the
//! prompt to an HTTP endpoint and falls back to mock when the endpoint is not
//! configured.

use async_trait::async_trait;
use causette_core::Generator;
use serde::Deserialize;

const ENV_GEN_MODE: &str = "CAUSETTE_GEN_MODE";
const ENV_GEN_API_URL: &str = "CAUSETTE_GEN_API_URL";
const ENV_GEN_API_KEY: &str = "CAUSETTE_GEN_API_KEY";

/// Generation mode: mock (deterministic local continuation) or live
/// (external HTTP completion API).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenMode {
    #[default]
    Mock,
    Live,
}

impl GenMode {
    pub fn from_env() -> Self {
        match std::env::var(ENV_GEN_MODE).as_deref() {
            Ok("live") => GenMode::Live,
            _ => GenMode::Mock,
        }
    }

    /// Parses a config label ("live" selects live mode, anything else mock).
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("live") {
            GenMode::Live
        } else {
            GenMode::Mock
        }
    }
}

#[derive(Deserialize)]
struct GenResponse {
    #[serde(default)]
    generated: Vec<String>,
}

/// Completion client with a mock and a live mode.
pub struct TextGenerator {
    mode: GenMode,
    client: reqwest::Client,
}

impl TextGenerator {
    pub fn new() -> Self {
        Self::with_mode(GenMode::from_env())
    }

    pub fn with_mode(mode: GenMode) -> Self {
        Self {
            mode,
            client: reqwest::Client::new(),
        }
    }

    /// Deterministic continuation: echoes the prompt and adds a short reply
    /// line after the `Bot:` marker, truncated to the token budget.
    fn mock_generate(&self, prompt: &str, max_new_tokens: usize) -> Vec<String> {
        let topic = prompt
            .strip_prefix("User: ")
            .and_then(|rest| rest.lines().next())
            .unwrap_or(prompt);
        let preview: String = topic.chars().take(40).collect();
        let sentence = format!(
            "Très bonne remarque sur « {preview} » ! Je suis un modèle simulé, mais je vous écoute avec attention."
        );
        let bounded = sentence
            .split_whitespace()
            .take(max_new_tokens)
            .collect::<Vec<_>>()
            .join(" ");
        vec![format!("{prompt} {bounded}\nUser:")]
    }

    /// Posts `{prompt, max_new_tokens}` to the configured endpoint. When the
    /// URL or key is absent, falls back to mock output.
    async fn live_generate(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let url = std::env::var(ENV_GEN_API_URL).ok();
        let key = std::env::var(ENV_GEN_API_KEY).ok();
        let (Some(url), Some(key)) = (url, key) else {
            tracing::debug!("live generation endpoint not configured, using mock output");
            return Ok(self.mock_generate(prompt, max_new_tokens));
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&serde_json::json!({
                "prompt": prompt,
                "max_new_tokens": max_new_tokens,
            }))
            .send()
            .await?
            .error_for_status()?;
        let body: GenResponse = response.json().await?;
        Ok(body.generated)
    }
}

impl Default for TextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for TextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        match self.mode {
            GenMode::Mock => Ok(self.mock_generate(prompt, max_new_tokens)),
            GenMode::Live => self.live_generate(prompt, max_new_tokens).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causette_core::generated_reply;

    #[test]
    fn mode_labels_parse() {
        assert_eq!(GenMode::from_label("live"), GenMode::Live);
        assert_eq!(GenMode::from_label("LIVE"), GenMode::Live);
        assert_eq!(GenMode::from_label("mock"), GenMode::Mock);
        assert_eq!(GenMode::from_label("anything"), GenMode::Mock);
    }

    #[tokio::test]
    async fn mock_output_keeps_the_marker_and_echoes_the_topic() {
        let generator = TextGenerator::with_mode(GenMode::Mock);
        let candidates = generator
            .generate("User: quelle heure est-il ?\nBot:", 50)
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].contains("Bot:"));
        assert!(candidates[0].contains("quelle heure est-il ?"));
    }

    #[tokio::test]
    async fn mock_output_respects_the_token_budget() {
        let generator = TextGenerator::with_mode(GenMode::Mock);
        let candidates = generator.generate("User: salut\nBot:", 3).await.unwrap();
        let after_marker = candidates[0]
            .split("Bot:")
            .nth(1)
            .unwrap()
            .lines()
            .next()
            .unwrap();
        assert_eq!(after_marker.split_whitespace().count(), 3);
    }

    #[tokio::test]
    async fn mock_round_trip_yields_a_non_placeholder_reply() {
        let generator = TextGenerator::with_mode(GenMode::Mock);
        let reply = generated_reply(&generator, "parle-moi de Paris").await.unwrap();
        assert!(!reply.is_empty());
        assert!(reply.contains("parle-moi de Paris"));
    }
}
