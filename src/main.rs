//! Code Unscramble demo driver
//!
//! Generates a puzzle, plays it greedily with words from a local lexicon,
//! then prints the score summary, leaderboard and ledger audit.
//!
//! Environment:
//! - `PUZZLE_ONLINE=1` uses the public word source and dictionary APIs
//! - `PUZZLE_LEXICON_DIR` points at a lexicon directory for the try-list
//! - `PUZZLE_SNAPSHOT` saves the store as JSON at the end
//! - `RUST_LOG` controls log verbosity (default `info`)

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use code_unscramble::{
    oracle::{Dictionary, DictionaryApi, HttpOracleConfig, Lexicon, RandomWordApi, WordSource},
    puzzle::FALLBACK_WORDS,
    EngineConfig, MemoryStore, PlayerId, PuzzleEngine, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    info!("Code Unscramble v{}", VERSION);

    let config = EngineConfig::from_env();
    let lexicon = match std::env::var("PUZZLE_LEXICON_DIR") {
        Ok(dir) => Lexicon::load_dir(&dir).with_context(|| format!("loading lexicon from {dir}"))?,
        Err(_) => Lexicon::from_words(FALLBACK_WORDS),
    };
    let try_list: Vec<String> = lexicon.iter().map(str::to_string).collect();

    let online = std::env::var("PUZZLE_ONLINE").map(|v| v == "1" || v == "true").unwrap_or(false);
    if online {
        let http = HttpOracleConfig::from_env();
        info!(source = %http.word_source_url, dictionary = %http.dictionary_url, "using HTTP collaborators");
        let engine = PuzzleEngine::new(
            MemoryStore::new(),
            RandomWordApi::new(&http)?,
            DictionaryApi::new(&http)?,
            config,
        );
        demo_puzzle(engine, &try_list).await
    } else {
        info!(words = lexicon.len(), "using local lexicon");
        let engine = PuzzleEngine::new(MemoryStore::new(), lexicon.clone(), lexicon, config);
        demo_puzzle(engine, &try_list).await
    }
}

/// Play one puzzle end to end.
async fn demo_puzzle<W, D>(engine: PuzzleEngine<MemoryStore, W, D>, try_list: &[String]) -> anyhow::Result<()>
where
    W: WordSource,
    D: Dictionary,
{
    info!("=== Starting Demo Puzzle ===");

    let player = PlayerId::new(*uuid::Uuid::new_v4().as_bytes());
    engine.store().register_player(player).await;

    let puzzle = engine.create_puzzle(player, None).await?;
    info!(puzzle = %puzzle.id, code = %puzzle.letters, "puzzle ready");

    // Longest words first spends the most letters
    let mut candidates: Vec<&String> = try_list.iter().collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut remaining = puzzle.letters.clone();
    for word in candidates {
        if remaining.len() < engine.config().min_word_len {
            break;
        }
        if !code_unscramble::LetterPool::from_letters(&remaining).can_afford(word) {
            continue;
        }
        let result = engine.submit_word(player, puzzle.id, word).await?;
        if let Some(left) = result.remaining_letters {
            remaining = left;
        }
    }

    info!("=== Results ===");
    let summary = engine.finalize_score(player, puzzle.id).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let leaderboard = engine.leaderboard(player, None).await?;
    for (rank, entry) in leaderboard.iter().enumerate() {
        info!("#{}: {} - {}", rank + 1, entry.word, entry.score);
    }

    info!("=== Verifying Ledger ===");
    let audit = engine.audit(player, puzzle.id).await?;
    info!(?audit, "ledger audit");

    if let Ok(path) = std::env::var("PUZZLE_SNAPSHOT") {
        engine.store().save_snapshot(&path).await?;
    }

    Ok(())
}
