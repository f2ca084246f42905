//! Puzzle Engine Logic
//!
//! ## Module Structure
//!
//! - `state`: identifiers and persisted records
//! - `generator`: letter pool generation from source words
//! - `validator`: submission checks and letter spending
//! - `ledger`: append-only submission history per (player, puzzle)
//! - `scoring`: totals and leaderboard aggregation

pub mod generator;
pub mod ledger;
pub mod scoring;
pub mod state;
pub mod validator;

// Re-export key types
pub use generator::{GeneratedPuzzle, PuzzleGenerator, FALLBACK_WORDS, MAX_WORD_COUNT};
pub use ledger::{LedgerAudit, PairState, SubmissionLedger};
pub use scoring::{LeaderboardEntry, ScoreSummary};
pub use state::{PlayerId, Puzzle, PuzzleId, Submission, SubmissionId};
pub use validator::{Accepted, Rejection, WordValidator};
