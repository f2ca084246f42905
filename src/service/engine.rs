//! Puzzle Engine
//!
//! The outward interface of the crate: create a puzzle, submit words,
//! finalize a score, read a leaderboard.
//!
//! Acceptance for one (player, puzzle) pair is serialized: the
//! read-validate-append sequence runs under a pair-scoped lock, and the
//! append itself is a compare-and-append on the pair's submission count.
//! Different pairs never contend.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::core::rng::DeterministicRng;
use crate::oracle::{Dictionary, WordSource};
use crate::puzzle::generator::{PuzzleGenerator, MAX_WORD_COUNT};
use crate::puzzle::ledger::{LedgerAudit, SubmissionLedger};
use crate::puzzle::scoring::{self, LeaderboardEntry, ScoreSummary};
use crate::puzzle::state::{PlayerId, Puzzle, PuzzleId};
use crate::puzzle::validator::{self, Rejection, WordValidator};
use crate::service::config::EngineConfig;
use crate::store::{PuzzleStore, StoreError};

type PairKey = (PlayerId, PuzzleId);

/// Engine errors. Word rejections are not errors; see [`SubmitResult`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Player unknown to the store.
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// Puzzle unknown to the store.
    #[error("puzzle {0} not found")]
    PuzzleNotFound(PuzzleId),

    /// Malformed request parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Persistence failure.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PuzzleNotFound(id) => EngineError::PuzzleNotFound(id),
            other => EngineError::Store(other),
        }
    }
}

/// Outcome of a word submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Whether the word was recorded.
    pub accepted: bool,
    /// Why it was not, if rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
    /// Score awarded, if accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    /// Letters left after the word, if accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_letters: Option<String>,
}

impl SubmitResult {
    fn accepted(score: u32, remaining_letters: String) -> Self {
        Self {
            accepted: true,
            reason: None,
            score: Some(score),
            remaining_letters: Some(remaining_letters),
        }
    }

    fn rejected(reason: Rejection) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            score: None,
            remaining_letters: None,
        }
    }
}

/// Puzzle engine over a store and two collaborators.
pub struct PuzzleEngine<S, W, D> {
    store: S,
    word_source: W,
    dictionary: D,
    config: EngineConfig,
    generator: PuzzleGenerator,
    /// Master RNG; each puzzle gets a seed drawn from it.
    rng: Mutex<DeterministicRng>,
    pair_locks: RwLock<BTreeMap<PairKey, Arc<Mutex<()>>>>,
}

impl<S, W, D> PuzzleEngine<S, W, D>
where
    S: PuzzleStore,
    W: WordSource,
    D: Dictionary,
{
    /// Create an engine.
    pub fn new(store: S, word_source: W, dictionary: D, config: EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => DeterministicRng::new(seed),
            None => {
                let (rng, seed) = DeterministicRng::from_entropy();
                info!(seed, "no RNG seed configured, drew one from entropy");
                rng
            }
        };

        Self {
            generator: PuzzleGenerator::new(config.source_word_lengths.clone()),
            store,
            word_source,
            dictionary,
            config,
            rng: Mutex::new(rng),
            pair_locks: RwLock::new(BTreeMap::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ledger(&self) -> SubmissionLedger<'_, S> {
        SubmissionLedger::new(&self.store)
    }

    async fn require_player(&self, player: PlayerId) -> Result<(), EngineError> {
        if self.store.player_exists(player).await? {
            Ok(())
        } else {
            Err(EngineError::PlayerNotFound(player))
        }
    }

    async fn require_puzzle(&self, id: PuzzleId) -> Result<Puzzle, EngineError> {
        self.store
            .get_puzzle(id)
            .await?
            .ok_or(EngineError::PuzzleNotFound(id))
    }

    async fn pair_lock(&self, key: PairKey) -> Arc<Mutex<()>> {
        if let Some(lock) = self.pair_locks.read().await.get(&key) {
            return lock.clone();
        }
        let mut locks = self.pair_locks.write().await;
        locks.entry(key).or_default().clone()
    }

    /// Drop the caller's handle and forget the lock once nobody else holds it.
    async fn release_pair_lock(&self, key: PairKey, lock: Arc<Mutex<()>>) {
        let mut locks = self.pair_locks.write().await;
        drop(lock);
        // Handles are cloned under the map lock, so a count of one is the map's own
        if locks.get(&key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(&key);
        }
    }

    /// Candidate words, or `None` if the source failed or timed out.
    async fn fetch_candidates(&self) -> Option<Vec<String>> {
        let fetch = self.word_source.fetch_candidate_words();
        match tokio::time::timeout(self.config.external_timeout, fetch).await {
            Ok(Ok(words)) => Some(words),
            Ok(Err(e)) => {
                warn!(error = %e, "word source failed");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.external_timeout.as_millis() as u64,
                    "word source timed out"
                );
                None
            }
        }
    }

    /// Generate and persist a new puzzle owned by `player`.
    ///
    /// Word source trouble never fails this call; the built-in list is
    /// used instead.
    pub async fn create_puzzle(&self, player: PlayerId, word_count: Option<usize>) -> Result<Puzzle, EngineError> {
        let word_count = word_count.unwrap_or(self.config.default_word_count);
        if !(1..=MAX_WORD_COUNT).contains(&word_count) {
            return Err(EngineError::InvalidInput(format!(
                "word count must be between 1 and {MAX_WORD_COUNT}, got {word_count}"
            )));
        }
        self.require_player(player).await?;

        let candidates = self.fetch_candidates().await;
        let seed = self.rng.lock().await.next_u64();
        let generated = self
            .generator
            .generate(candidates, word_count, &mut DeterministicRng::new(seed));

        let puzzle = self.store.insert_puzzle(player, generated.letters).await?;

        debug!(puzzle = %puzzle.id, sources = ?generated.source_words, seed, "puzzle source words");
        info!(
            puzzle = %puzzle.id,
            owner = %player,
            letters = puzzle.letters.len(),
            fallback = generated.used_fallback,
            "puzzle created"
        );
        Ok(puzzle)
    }

    /// Try to claim `word` from the player's remaining letters.
    ///
    /// Malformed words are rejected before the store or dictionary is consulted.
    pub async fn submit_word(
        &self,
        player: PlayerId,
        puzzle_id: PuzzleId,
        word: &str,
    ) -> Result<SubmitResult, EngineError> {
        let word = match validator::normalize(word, self.config.min_word_len) {
            Ok(word) => word,
            Err(reason) => {
                info!(puzzle = %puzzle_id, player = %player, word, reason = reason.code(), "word rejected");
                return Ok(SubmitResult::rejected(reason));
            }
        };

        self.require_player(player).await?;
        let puzzle = self.require_puzzle(puzzle_id).await?;

        let key = (player, puzzle_id);
        let lock = self.pair_lock(key).await;
        let result = {
            let _guard = lock.lock().await;
            self.submit_locked(player, &puzzle, &word).await
        };
        self.release_pair_lock(key, lock).await;
        result
    }

    /// Read, validate and append for one pair. Caller holds the pair lock.
    async fn submit_locked(&self, player: PlayerId, puzzle: &Puzzle, word: &str) -> Result<SubmitResult, EngineError> {
        let ledger = self.ledger();
        let pair = ledger.pair_state(player, puzzle).await?;

        let validator = WordValidator::new(&self.dictionary, self.config.min_word_len, self.config.external_timeout);
        let accepted = match validator.validate(word, &pair).await {
            Ok(accepted) => accepted,
            Err(reason) => {
                info!(puzzle = %puzzle.id, player = %player, word, reason = reason.code(), "word rejected");
                return Ok(SubmitResult::rejected(reason));
            }
        };

        let submission = ledger
            .append(
                player,
                puzzle.id,
                accepted.word,
                accepted.score,
                accepted.remaining.to_string(),
                pair.submission_count(),
            )
            .await?;

        info!(
            puzzle = %puzzle.id,
            player = %player,
            word = %submission.word,
            score = submission.score,
            remaining = %submission.remaining_letters,
            "word accepted"
        );
        Ok(SubmitResult::accepted(submission.score, submission.remaining_letters))
    }

    /// Sum of accepted word scores for the pair.
    pub async fn total_score(&self, player: PlayerId, puzzle_id: PuzzleId) -> Result<u32, EngineError> {
        let submissions = self.store.submissions_for_pair(player, puzzle_id).await?;
        Ok(scoring::total_score(&submissions))
    }

    /// Score, words found and letters for the pair.
    pub async fn finalize_score(&self, player: PlayerId, puzzle_id: PuzzleId) -> Result<ScoreSummary, EngineError> {
        self.require_player(player).await?;
        let puzzle = self.require_puzzle(puzzle_id).await?;

        let submissions = self.store.submissions_for_pair(player, puzzle_id).await?;
        let remaining_letters = submissions
            .last()
            .map(|s| s.remaining_letters.clone())
            .unwrap_or_else(|| puzzle.letters.clone());

        Ok(ScoreSummary {
            total_score: scoring::total_score(&submissions),
            words_found: submissions.into_iter().map(|s| s.word).collect(),
            puzzle_letters: puzzle.letters,
            remaining_letters,
        })
    }

    /// The player's best score per distinct word across all puzzles.
    pub async fn leaderboard(&self, player: PlayerId, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>, EngineError> {
        self.require_player(player).await?;
        let submissions = self.store.submissions_for_player(player).await?;
        Ok(scoring::top_scores(
            &submissions,
            limit.unwrap_or(self.config.leaderboard_limit),
        ))
    }

    /// Replay the pair's ledger and compare with the cached pool.
    pub async fn audit(&self, player: PlayerId, puzzle_id: PuzzleId) -> Result<LedgerAudit, EngineError> {
        let puzzle = self.require_puzzle(puzzle_id).await?;
        let audit = self.ledger().verify_pair(player, &puzzle).await?;
        if !matches!(audit, LedgerAudit::Consistent { .. }) {
            warn!(puzzle = %puzzle_id, player = %player, ?audit, "ledger audit failed");
        }
        Ok(audit)
    }
}

// =============================================================================
// TESTS
// =============================================================================
