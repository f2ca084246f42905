//! Persistence Layer
//!
//! The engine needs a durable, append-only view of puzzles and submissions.
//! [`PuzzleStore`] is that view; [`MemoryStore`] is the in-process
//! implementation with JSON snapshot files for durability.

pub mod memory;

use std::future::Future;

use thiserror::Error;

use crate::puzzle::state::{NewSubmission, PlayerId, Puzzle, PuzzleId, Submission};

pub use memory::MemoryStore;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced puzzle does not exist.
    #[error("puzzle {0} not found")]
    PuzzleNotFound(PuzzleId),

    /// Compare-and-append lost a race: the pair's ledger moved on.
    #[error("ledger conflict: expected {expected} prior submissions, found {actual}")]
    Conflict {
        /// Count the caller validated against.
        expected: usize,
        /// Count actually present.
        actual: usize,
    },

    /// Snapshot file I/O failed.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Durable store for puzzles and submissions.
///
/// All submission queries return records in creation order.
pub trait PuzzleStore: Send + Sync {
    /// Whether the player is known to the store.
    fn player_exists(&self, player: PlayerId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Persist a new puzzle and return it with its assigned id.
    fn insert_puzzle(
        &self,
        owner: PlayerId,
        letters: String,
    ) -> impl Future<Output = Result<Puzzle, StoreError>> + Send;

    /// Look up a puzzle.
    fn get_puzzle(&self, id: PuzzleId) -> impl Future<Output = Result<Option<Puzzle>, StoreError>> + Send;

    /// Append a submission if the pair still has exactly `expected_prior`
    /// submissions; otherwise fail with [`StoreError::Conflict`].
    fn append_submission(
        &self,
        submission: NewSubmission,
        expected_prior: usize,
    ) -> impl Future<Output = Result<Submission, StoreError>> + Send;

    /// All submissions for one (player, puzzle) pair.
    fn submissions_for_pair(
        &self,
        player: PlayerId,
        puzzle: PuzzleId,
    ) -> impl Future<Output = Result<Vec<Submission>, StoreError>> + Send;

    /// All submissions by one player across every puzzle.
    fn submissions_for_player(
        &self,
        player: PlayerId,
    ) -> impl Future<Output = Result<Vec<Submission>, StoreError>> + Send;
}
