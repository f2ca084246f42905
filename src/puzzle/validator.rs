//! Word Validation
//!
//! Decides whether a submitted word may be accepted against a pair's
//! current state. Checks run in this order so the player sees the most
//! specific reason:
//!
//! 1. shape (lowercase ASCII letters, minimum length)
//! 2. dictionary oracle (bounded by a timeout, fail-closed)
//! 3. duplicate for this (player, puzzle) pair
//! 4. affordability against the remaining letters
//!
//! Validation never mutates anything; the caller appends on acceptance.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::letters::LetterPool;
use crate::oracle::Dictionary;
use crate::puzzle::ledger::PairState;

/// Minimum accepted word length.
pub const MIN_WORD_LEN: usize = 2;

/// Why a word was not accepted. Recoverable; the player may try again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Too short or not purely alphabetic.
    #[error("word must be at least the minimum length and contain only letters")]
    InvalidInput,
    /// Dictionary said no, or could not be reached.
    #[error("not a valid English word")]
    NotAWord,
    /// Already accepted for this player and puzzle.
    #[error("word already submitted")]
    DuplicateWord,
    /// Cannot be formed from the letters still available.
    #[error("not enough letters remaining")]
    LettersUnavailable,
}

impl Rejection {
    /// Stable snake_case code.
    pub fn code(self) -> &'static str {
        match self {
            Rejection::InvalidInput => "invalid_input",
            Rejection::NotAWord => "not_a_word",
            Rejection::DuplicateWord => "duplicate_word",
            Rejection::LettersUnavailable => "letters_unavailable",
        }
    }
}

/// A word that passed every check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accepted {
    /// Normalized word.
    pub word: String,
    /// Score (word length).
    pub score: u32,
    /// Pool after spending the word's letters.
    pub remaining: LetterPool,
}

/// Lowercase `word` and check its shape.
pub fn normalize(word: &str, min_len: usize) -> Result<String, Rejection> {
    let word = word.to_lowercase();
    if word.chars().count() < min_len || !word.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(Rejection::InvalidInput);
    }
    Ok(word)
}

/// Validator bound to a dictionary.
pub struct WordValidator<'a, D> {
    dictionary: &'a D,
    min_len: usize,
    timeout: Duration,
}

impl<'a, D: Dictionary> WordValidator<'a, D> {
    /// Create a validator; `timeout` bounds each dictionary call.
    pub fn new(dictionary: &'a D, min_len: usize, timeout: Duration) -> Self {
        Self {
            dictionary,
            min_len,
            timeout,
        }
    }

    /// Dictionary lookup. Errors and timeouts count as "not a word".
    async fn is_real_word(&self, word: &str) -> bool {
        match tokio::time::timeout(self.timeout, self.dictionary.is_real_word(word)).await {
            Ok(Ok(found)) => found,
            Ok(Err(e)) => {
                warn!(word, error = %e, "dictionary lookup failed");
                false
            }
            Err(_) => {
                warn!(word, timeout_ms = self.timeout.as_millis() as u64, "dictionary lookup timed out");
                false
            }
        }
    }

    /// Validate `word` against `pair`.
    pub async fn validate(&self, word: &str, pair: &PairState) -> Result<Accepted, Rejection> {
        let word = normalize(word, self.min_len)?;

        if !self.is_real_word(&word).await {
            return Err(Rejection::NotAWord);
        }

        if pair.has_word(&word) {
            return Err(Rejection::DuplicateWord);
        }

        let mut remaining = LetterPool::from_letters(&pair.remaining);
        if !remaining.can_afford(&word) {
            debug!(word = %word, remaining = %remaining, "letters unavailable");
            return Err(Rejection::LettersUnavailable);
        }
        for c in word.chars() {
            remaining
                .subtract_one(c)
                .map_err(|_| Rejection::LettersUnavailable)?;
        }

        Ok(Accepted {
            score: word.chars().count() as u32,
            word,
            remaining,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
