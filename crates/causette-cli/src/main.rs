//! Causette CLI: interactive read-reply loop over the rule-based responder.

use causette_core::{BotConfig, KnowledgeBase, Responder, ReplyOptions};
use causette_nlp::{GenMode, HeuristicAnnotator, TextGenerator};
use clap::Parser;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "quitter"];
const FAREWELL: &str = "Au revoir ! À bientôt !";

#[derive(Parser)]
#[command(name = "causette")]
#[command(about = "Rule-based FAQ chatbot with optional NLP assistance and generation")]
struct Args {
    /// Knowledge (FAQ) file, overriding the configured path
    #[arg(short, long)]
    faq: Option<PathBuf>,

    /// Enable annotator-assisted intent matching
    #[arg(long)]
    nlp: bool,

    /// Append an analysis block (sentiment, entities, keywords) to replies
    #[arg(long)]
    analyze: bool,

    /// Replace canned responses with generated text
    #[arg(long)]
    generate: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = BotConfig::load().unwrap_or_else(|e| {
        warn!("config unavailable, using defaults: {e}");
        BotConfig::default()
    });

    let faq_path = args
        .faq
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| config.faq_path.clone());
    let kb = KnowledgeBase::load_or_empty(&faq_path);
    info!(intents = kb.len(), path = %faq_path, "knowledge base loaded");

    let analyze = args.analyze || config.analyze;
    let nlp_enabled = args.nlp || analyze || config.nlp_enabled;
    let generate = args.generate || config.generate;

    let mut responder = Responder::new(kb);
    if nlp_enabled {
        responder = responder.with_annotator(Arc::new(HeuristicAnnotator::new()));
    }
    if generate {
        let mode = GenMode::from_label(&config.llm_mode);
        info!(?mode, "generation mode enabled");
        responder = responder.with_generator(Arc::new(TextGenerator::with_mode(mode)));
    }
    let opts = ReplyOptions { generate, analyze };

    if let Err(e) = run_session(&responder, &opts, &config.app_name).await {
        eprintln!("Erreur: {e}");
    }
}

/// Blocks on input and processes one message fully before reading the next.
/// Ends on an exit keyword, Ctrl-C or end of input.
async fn run_session(
    responder: &Responder,
    opts: &ReplyOptions,
    app_name: &str,
) -> std::io::Result<()> {
    println!("{}", "=".repeat(50));
    println!("{app_name} - Tapez 'quit' ou 'exit' pour quitter");
    println!("{}", "=".repeat(50));
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("Vous: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\nBot: {FAREWELL}");
                return Ok(());
            }
        };
        let Some(line) = line else {
            println!("\nBot: {FAREWELL}");
            return Ok(());
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_word(input) {
            println!("Bot: {FAREWELL}");
            return Ok(());
        }

        let reply = responder.respond(input, opts).await;
        println!("Bot: {reply}");
        println!();
    }
}

fn is_exit_word(input: &str) -> bool {
    let lowered = input.to_lowercase();
    EXIT_WORDS.iter().any(|word| lowered == *word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_are_case_insensitive() {
        assert!(is_exit_word("quit"));
        assert!(is_exit_word("EXIT"));
        assert!(is_exit_word("Quitter"));
        assert!(!is_exit_word("quitte"));
        assert!(!is_exit_word("bonjour quit"));
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from(["causette", "--nlp", "--generate", "--faq", "x.json"])
            .unwrap();
        assert!(args.nlp);
        assert!(args.generate);
        assert!(!args.analyze);
        assert_eq!(args.faq.unwrap(), PathBuf::from("x.json"));
    }
}
