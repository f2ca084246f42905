//! Scoring and Leaderboard
//!
//! Totals are summed from recorded `score` values, never re-derived from
//! letters, so historical totals stay auditable.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::puzzle::state::Submission;

/// Default leaderboard size.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Final result for one (player, puzzle) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Sum of accepted word scores.
    pub total_score: u32,
    /// Accepted words in submission order.
    pub words_found: Vec<String>,
    /// The puzzle's original letters.
    pub puzzle_letters: String,
    /// Letters left unspent.
    pub remaining_letters: String,
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Distinct word.
    pub word: String,
    /// Best score recorded for that word.
    pub score: u32,
}

/// Sum of `score` over `submissions`.
pub fn total_score(submissions: &[Submission]) -> u32 {
    submissions.iter().map(|s| s.score).sum()
}

/// Best score per distinct word, highest first.
///
/// Ties are broken alphabetically by word so the ranking is stable.
pub fn top_scores(submissions: &[Submission], limit: usize) -> Vec<LeaderboardEntry> {
    let mut best: BTreeMap<String, u32> = BTreeMap::new();
    for submission in submissions {
        let entry = best.entry(submission.word.to_lowercase()).or_insert(0);
        *entry = (*entry).max(submission.score);
    }

    let mut entries: Vec<LeaderboardEntry> = best
        .into_iter()
        .map(|(word, score)| LeaderboardEntry { word, score })
        .collect();
    // Stable sort keeps the BTreeMap's alphabetical order within a score
    entries.sort_by_key(|e| Reverse(e.score));
    entries.truncate(limit);
    entries
}

// =============================================================================
// TESTS
// =============================================================================
