//! In-Memory Store
//!
//! Tables guarded by a single tokio `RwLock`. Ids are assigned from
//! counters inside the write lock, so creation order is a strict total order.
//! Durability comes from whole-store JSON snapshots.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{PuzzleStore, StoreError};
use crate::puzzle::state::{
    NewSubmission, PlayerId, Puzzle, PuzzleId, Submission, SubmissionId,
};

/// Serialized form of the whole store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Tables {
    players: BTreeSet<PlayerId>,
    puzzles: Vec<Puzzle>,
    submissions: Vec<Submission>,
    next_puzzle_id: u64,
    next_submission_id: u64,
}

impl Tables {
    fn puzzle(&self, id: PuzzleId) -> Option<&Puzzle> {
        // Ids are assigned in push order
        self.puzzles
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|idx| &self.puzzles[idx])
    }

    fn pair_submissions(&self, player: PlayerId, puzzle: PuzzleId) -> impl Iterator<Item = &Submission> {
        self.submissions
            .iter()
            .filter(move |s| s.player_id == player && s.puzzle_id == puzzle)
    }
}

/// Process-local [`PuzzleStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a player known to the store. Returns false if already present.
    pub async fn register_player(&self, player: PlayerId) -> bool {
        let mut tables = self.tables.write().await;
        tables.players.insert(player)
    }

    /// Number of stored puzzles.
    pub async fn puzzle_count(&self) -> usize {
        self.tables.read().await.puzzles.len()
    }

    /// Number of stored submissions.
    pub async fn submission_count(&self) -> usize {
        self.tables.read().await.submissions.len()
    }

    /// Write the whole store to `path` as JSON.
    ///
    /// Writes a sibling temp file and renames it over `path`, so a crash
    /// mid-write leaves the previous snapshot intact.
    pub async fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let bytes = {
            let tables = self.tables.read().await;
            serde_json::to_vec_pretty(&*tables)?
        };

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        info!(path = %path.display(), bytes = bytes.len(), "store snapshot saved");
        Ok(())
    }

    /// Load a store previously written by [`MemoryStore::save_snapshot`].
    pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let tables: Tables = serde_json::from_slice(&bytes)?;

        info!(
            path = %path.display(),
            puzzles = tables.puzzles.len(),
            submissions = tables.submissions.len(),
            "store snapshot loaded"
        );
        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

impl PuzzleStore for MemoryStore {
    async fn player_exists(&self, player: PlayerId) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.players.contains(&player))
    }

    async fn insert_puzzle(&self, owner: PlayerId, letters: String) -> Result<Puzzle, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_puzzle_id += 1;

        let puzzle = Puzzle {
            id: PuzzleId(tables.next_puzzle_id),
            owner,
            letters,
            created_at: Utc::now(),
        };
        tables.puzzles.push(puzzle.clone());

        debug!(puzzle = %puzzle.id, "puzzle row inserted");
        Ok(puzzle)
    }

    async fn get_puzzle(&self, id: PuzzleId) -> Result<Option<Puzzle>, StoreError> {
        Ok(self.tables.read().await.puzzle(id).cloned())
    }

    async fn append_submission(
        &self,
        submission: NewSubmission,
        expected_prior: usize,
    ) -> Result<Submission, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.puzzle(submission.puzzle_id).is_none() {
            return Err(StoreError::PuzzleNotFound(submission.puzzle_id));
        }

        let actual = tables
            .pair_submissions(submission.player_id, submission.puzzle_id)
            .count();
        if actual != expected_prior {
            return Err(StoreError::Conflict {
                expected: expected_prior,
                actual,
            });
        }

        tables.next_submission_id += 1;
        let record = Submission {
            id: SubmissionId(tables.next_submission_id),
            puzzle_id: submission.puzzle_id,
            player_id: submission.player_id,
            word: submission.word,
            score: submission.score,
            remaining_letters: submission.remaining_letters,
            created_at: Utc::now(),
        };
        tables.submissions.push(record.clone());

        Ok(record)
    }

    async fn submissions_for_pair(
        &self,
        player: PlayerId,
        puzzle: PuzzleId,
    ) -> Result<Vec<Submission>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.pair_submissions(player, puzzle).cloned().collect())
    }

    async fn submissions_for_player(&self, player: PlayerId) -> Result<Vec<Submission>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .submissions
            .iter()
            .filter(|s| s.player_id == player)
            .cloned()
            .collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
