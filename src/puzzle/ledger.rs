//! Submission Ledger
//!
//! The single source of truth for what a player has claimed from a puzzle.
//! Each submission caches the pool left after it (`remaining_letters`);
//! [`SubmissionLedger::verify_pair`] replays the pair's words from the
//! original letters and checks the cache agrees.

use serde::{Deserialize, Serialize};

use crate::core::letters::{LetterPool, NotAvailable};
use crate::puzzle::state::{NewSubmission, PlayerId, Puzzle, PuzzleId, Submission};
use crate::store::{PuzzleStore, StoreError};

/// Snapshot of one (player, puzzle) pair, read in a single query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairState {
    /// Accepted words in submission order.
    pub words: Vec<String>,
    /// Letters currently available.
    pub remaining: String,
}

impl PairState {
    /// Derive the pair state from the puzzle and its submissions (in order).
    pub fn from_submissions(puzzle: &Puzzle, submissions: &[Submission]) -> Self {
        let remaining = submissions
            .last()
            .map(|s| s.remaining_letters.clone())
            .unwrap_or_else(|| puzzle.letters.clone());
        Self {
            words: submissions.iter().map(|s| s.word.clone()).collect(),
            remaining,
        }
    }

    /// Number of accepted submissions.
    pub fn submission_count(&self) -> usize {
        self.words.len()
    }

    /// Whether `word` (already lowercase) was accepted before.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

/// Result of replaying a pair's ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LedgerAudit {
    /// Cache and replay agree.
    Consistent {
        /// Remaining letters, sorted.
        remaining: String,
    },
    /// The cached snapshot differs from the replayed pool.
    Mismatch {
        /// Latest cached `remaining_letters`, sorted.
        cached: String,
        /// Pool obtained by replay, sorted.
        replayed: String,
    },
    /// A recorded word could not be paid for during replay.
    Overdrawn {
        /// The word that failed.
        word: String,
    },
}

/// Replay accepted words against the original letters.
pub fn replay<'w, I>(letters: &str, words: I) -> Result<LetterPool, (String, NotAvailable)>
where
    I: IntoIterator<Item = &'w str>,
{
    let mut pool = LetterPool::from_letters(letters);
    for word in words {
        pool.subtract_word(word).map_err(|e| (word.to_string(), e))?;
    }
    Ok(pool)
}

/// Ledger view over a [`PuzzleStore`].
pub struct SubmissionLedger<'a, S> {
    store: &'a S,
}

impl<'a, S: PuzzleStore> SubmissionLedger<'a, S> {
    /// Wrap a store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Append an accepted word. The only write path for submissions.
    ///
    /// `expected_prior` is the pair's submission count the caller validated
    /// against; a mismatch fails with [`StoreError::Conflict`].
    pub async fn append(
        &self,
        player: PlayerId,
        puzzle: PuzzleId,
        word: String,
        score: u32,
        remaining_letters: String,
        expected_prior: usize,
    ) -> Result<Submission, StoreError> {
        let submission = NewSubmission {
            puzzle_id: puzzle,
            player_id: player,
            word,
            score,
            remaining_letters,
        };
        self.store.append_submission(submission, expected_prior).await
    }

    /// Letters currently available to `player` on `puzzle`.
    pub async fn remaining_letters_for(&self, player: PlayerId, puzzle: &Puzzle) -> Result<String, StoreError> {
        Ok(self.pair_state(player, puzzle).await?.remaining)
    }

    /// Accepted words for the pair, in submission order.
    pub async fn words_for(&self, player: PlayerId, puzzle: PuzzleId) -> Result<Vec<String>, StoreError> {
        let submissions = self.store.submissions_for_pair(player, puzzle).await?;
        Ok(submissions.into_iter().map(|s| s.word).collect())
    }

    /// Words and remaining letters for the pair from one read.
    pub async fn pair_state(&self, player: PlayerId, puzzle: &Puzzle) -> Result<PairState, StoreError> {
        let submissions = self.store.submissions_for_pair(player, puzzle.id).await?;
        Ok(PairState::from_submissions(puzzle, &submissions))
    }

    /// Replay the pair's words and compare with the cached snapshot.
    pub async fn verify_pair(&self, player: PlayerId, puzzle: &Puzzle) -> Result<LedgerAudit, StoreError> {
        let state = self.pair_state(player, puzzle).await?;
        let audit = match replay(&puzzle.letters, state.words.iter().map(String::as_str)) {
            Err((word, _)) => LedgerAudit::Overdrawn { word },
            Ok(replayed) => {
                let cached = LetterPool::from_letters(&state.remaining);
                if cached == replayed {
                    LedgerAudit::Consistent {
                        remaining: replayed.to_string(),
                    }
                } else {
                    LedgerAudit::Mismatch {
                        cached: cached.to_string(),
                        replayed: replayed.to_string(),
                    }
                }
            }
        };
        Ok(audit)
    }
}

// =============================================================================
// TESTS
// =============================================================================
