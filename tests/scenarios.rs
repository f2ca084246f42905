//! End-to-end engine scenarios.

use std::sync::Arc;
use std::time::Duration;

use code_unscramble::{
    oracle::{Dictionary, Lexicon, OracleError, Unavailable, WordSource},
    puzzle::{LedgerAudit, FALLBACK_WORDS},
    EngineConfig, LeaderboardEntry, LetterPool, MemoryStore, PlayerId, PuzzleEngine, PuzzleStore,
    Rejection,
};

/// Word source that never answers in time.
struct StalledSource;

impl WordSource for StalledSource {
    async fn fetch_candidate_words(&self) -> Result<Vec<String>, OracleError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec!["never".into()])
    }
}

/// Word source with a fixed answer.
struct FixedSource(Vec<String>);

impl WordSource for FixedSource {
    async fn fetch_candidate_words(&self) -> Result<Vec<String>, OracleError> {
        Ok(self.0.clone())
    }
}

/// Dictionary that accepts everything.
struct AcceptAll;

impl Dictionary for AcceptAll {
    async fn is_real_word(&self, _word: &str) -> Result<bool, OracleError> {
        Ok(true)
    }
}

const PLAYER: PlayerId = PlayerId::new([1; 16]);

async fn engine<W: WordSource, D: Dictionary>(source: W, dictionary: D) -> PuzzleEngine<MemoryStore, W, D> {
    let config = EngineConfig {
        external_timeout: Duration::from_millis(50),
        ..EngineConfig::default().with_seed(42)
    };
    let engine = PuzzleEngine::new(MemoryStore::new(), source, dictionary, config);
    engine.store().register_player(PLAYER).await;
    engine
}

fn sorted(s: &str) -> String {
    LetterPool::from_letters(s).to_string()
}

#[tokio::test]
async fn codeword_scenario() {
    let engine = engine(Unavailable, Lexicon::from_words(["code", "word", "ode"])).await;
    let puzzle = engine.store().insert_puzzle(PLAYER, "codeword".into()).await.unwrap();

    let first = engine.submit_word(PLAYER, puzzle.id, "code").await.unwrap();
    assert!(first.accepted);
    assert_eq!(first.score, Some(4));
    assert_eq!(first.remaining_letters.as_deref().map(sorted), Some(sorted("word")));

    let second = engine.submit_word(PLAYER, puzzle.id, "word").await.unwrap();
    assert!(second.accepted);
    assert_eq!(second.score, Some(4));
    assert_eq!(second.remaining_letters.as_deref(), Some(""));

    let again = engine.submit_word(PLAYER, puzzle.id, "code").await.unwrap();
    assert_eq!(again.reason, Some(Rejection::DuplicateWord));

    let exhausted = engine.submit_word(PLAYER, puzzle.id, "ode").await.unwrap();
    assert_eq!(exhausted.reason, Some(Rejection::LettersUnavailable));

    assert_eq!(engine.total_score(PLAYER, puzzle.id).await.unwrap(), 8);

    let summary = engine.finalize_score(PLAYER, puzzle.id).await.unwrap();
    assert_eq!(summary.total_score, 8);
    assert_eq!(summary.words_found, ["code", "word"]);
    assert_eq!(summary.puzzle_letters, "codeword");
    assert_eq!(summary.remaining_letters, "");
}

#[tokio::test]
async fn repeated_letter_scenario() {
    let engine = engine(Unavailable, Lexicon::from_words(["aa", "ab"])).await;
    let puzzle = engine.store().insert_puzzle(PLAYER, "aab".into()).await.unwrap();

    let first = engine.submit_word(PLAYER, puzzle.id, "aa").await.unwrap();
    assert!(first.accepted);
    assert_eq!(first.remaining_letters.as_deref(), Some("b"));

    let second = engine.submit_word(PLAYER, puzzle.id, "ab").await.unwrap();
    assert_eq!(second.reason, Some(Rejection::LettersUnavailable));
}

#[tokio::test]
async fn leaderboard_scenario() {
    let engine = engine(Unavailable, Lexicon::from_words(["cat", "cats", "dog"])).await;
    let first = engine.store().insert_puzzle(PLAYER, "catdog".into()).await.unwrap();
    let second = engine.store().insert_puzzle(PLAYER, "scatter".into()).await.unwrap();

    assert!(engine.submit_word(PLAYER, first.id, "cat").await.unwrap().accepted);
    assert!(engine.submit_word(PLAYER, first.id, "dog").await.unwrap().accepted);
    assert!(engine.submit_word(PLAYER, second.id, "cat").await.unwrap().accepted);
    // 'c' already spent on this puzzle
    assert!(!engine.submit_word(PLAYER, second.id, "cats").await.unwrap().accepted);

    let third = engine.store().insert_puzzle(PLAYER, "cats".into()).await.unwrap();
    assert!(engine.submit_word(PLAYER, third.id, "cats").await.unwrap().accepted);

    let board = engine.leaderboard(PLAYER, Some(10)).await.unwrap();
    let expected = [("cats", 4), ("cat", 3), ("dog", 3)]
        .map(|(word, score)| LeaderboardEntry { word: word.into(), score });
    assert_eq!(board, expected);

    assert_eq!(engine.leaderboard(PLAYER, Some(1)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejection_order_is_most_specific_first() {
    let engine = engine(Unavailable, Lexicon::from_words(["code"])).await;
    let puzzle = engine.store().insert_puzzle(PLAYER, "xyz".into()).await.unwrap();

    let short = engine.submit_word(PLAYER, puzzle.id, "c").await.unwrap();
    assert_eq!(short.reason, Some(Rejection::InvalidInput));

    let unknown = engine.submit_word(PLAYER, puzzle.id, "zyx").await.unwrap();
    assert_eq!(unknown.reason, Some(Rejection::NotAWord));

    let unaffordable = engine.submit_word(PLAYER, puzzle.id, "code").await.unwrap();
    assert_eq!(unaffordable.reason, Some(Rejection::LettersUnavailable));

    // Failed attempts record nothing
    assert!(engine.store().submissions_for_pair(PLAYER, puzzle.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn stalled_word_source_falls_back() {
    let engine = engine(StalledSource, AcceptAll).await;

    let puzzle = tokio::time::timeout(Duration::from_secs(5), engine.create_puzzle(PLAYER, Some(2)))
        .await
        .expect("create_puzzle must not hang")
        .unwrap();

    // Two fallback words, 3 or 4 letters each
    assert!((6..=8).contains(&puzzle.letters.len()));
}

#[tokio::test]
async fn external_words_feed_generation() {
    let source = FixedSource(vec!["zebra".into(), "quiz".into(), "jazz".into(), "extraordinary".into()]);
    let engine = engine(source, AcceptAll).await;

    let puzzle = engine.create_puzzle(PLAYER, Some(3)).await.unwrap();
    assert_eq!(puzzle.letters.len(), 13);
    assert_eq!(sorted(&puzzle.letters), sorted("zebraquizjazz"));
}

#[tokio::test]
async fn fallback_puzzle_is_playable_with_fallback_words() {
    let engine = engine(Unavailable, Lexicon::from_words(FALLBACK_WORDS)).await;
    let puzzle = engine.create_puzzle(PLAYER, Some(3)).await.unwrap();

    // Some fallback word must be affordable: the puzzle was built from three of them
    let pool = LetterPool::from_letters(&puzzle.letters);
    let playable = FALLBACK_WORDS.iter().find(|w| pool.can_afford(w)).unwrap();
    assert!(engine.submit_word(PLAYER, puzzle.id, playable).await.unwrap().accepted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_accept_once() {
    let engine = Arc::new(engine(Unavailable, AcceptAll).await);
    let puzzle = engine.store().insert_puzzle(PLAYER, "codewordcode".into()).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.submit_word(PLAYER, puzzle.id, "code").await.unwrap() })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        let result = handle.await.unwrap();
        if result.accepted {
            accepted += 1;
        } else {
            assert_eq!(result.reason, Some(Rejection::DuplicateWord));
        }
    }
    assert_eq!(accepted, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_competitors_never_double_spend() {
    let engine = Arc::new(engine(Unavailable, AcceptAll).await);
    // One 'x' shared by every candidate word
    let puzzle = engine.store().insert_puzzle(PLAYER, "xabcdefgh".into()).await.unwrap();
    let words = ["xa", "xb", "xc", "xd", "xe", "xf", "xg", "xh"];

    let handles: Vec<_> = words
        .into_iter()
        .map(|word| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.submit_word(PLAYER, puzzle.id, word).await.unwrap() })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().accepted {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert!(matches!(
        engine.audit(PLAYER, puzzle.id).await.unwrap(),
        LedgerAudit::Consistent { .. }
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_pairs_progress_independently() {
    let engine = Arc::new(engine(Unavailable, AcceptAll).await);
    let players: Vec<PlayerId> = (10..14).map(|i| PlayerId::new([i; 16])).collect();
    for player in &players {
        engine.store().register_player(*player).await;
    }
    let puzzle = engine.store().insert_puzzle(PLAYER, "codeword".into()).await.unwrap();

    let handles: Vec<_> = players
        .iter()
        .map(|&player| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.submit_word(player, puzzle.id, "code").await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().accepted);
    }
}
