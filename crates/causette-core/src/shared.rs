//! Shared configuration for the responder binary.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Application identity shown in the session banner.
    pub app_name: String,
    /// Path to the knowledge (FAQ) JSON file.
    pub faq_path: String,
    /// Generation mode ("mock" or "live").
    pub llm_mode: String,
    /// Enable annotator-assisted intent matching.
    #[serde(default)]
    pub nlp_enabled: bool,
    /// Append the analysis block to every reply.
    #[serde(default)]
    pub analyze: bool,
    /// Replace canned responses with generated text.
    #[serde(default)]
    pub generate: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            app_name: "Causette".to_string(),
            faq_path: "data/faq.json".to_string(),
            llm_mode: "mock".to_string(),
            nlp_enabled: false,
            analyze: false,
            generate: false,
        }
    }
}

impl BotConfig {
    /// Load config from file and environment. Precedence: env
    /// `CAUSETTE_CONFIG` path > `config/causette.toml` > defaults;
    /// `CAUSETTE__*` environment variables override file values.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CAUSETTE_CONFIG").unwrap_or_else(|_| "config/causette.toml".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Causette")?
            .set_default("faq_path", "data/faq.json")?
            .set_default("llm_mode", "mock")?
            .set_default("nlp_enabled", false)?
            .set_default("analyze", false)?
            .set_default("generate", false)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("CAUSETTE").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_load_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.app_name, "Causette");
        assert_eq!(config.faq_path, "data/faq.json");
        assert_eq!(config.llm_mode, "mock");
        assert!(!config.nlp_enabled);
        assert!(!config.analyze);
        assert!(!config.generate);
    }
}
