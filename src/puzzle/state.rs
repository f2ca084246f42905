//! Puzzle Records
//!
//! Identifiers and the two persisted records: the immutable puzzle and the
//! append-only submission.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique player identifier (UUID as bytes).
///
/// Identity is issued by an external auth layer; the engine only compares
/// and orders these values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct PlayerId(pub [u8; 16]);

impl PlayerId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uuid_string())
    }
}

/// Store-assigned puzzle identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PuzzleId(pub u64);

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned submission identifier.
///
/// Strictly increasing in creation order across the whole store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub u64);

// =============================================================================
// RECORDS
// =============================================================================

/// A generated puzzle. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Puzzle id.
    pub id: PuzzleId,
    /// Player the puzzle was generated for.
    pub owner: PlayerId,
    /// Original letter pool ("the code"), lowercase.
    pub letters: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// An accepted word. Never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission id (creation order).
    pub id: SubmissionId,
    /// Puzzle the word was claimed from.
    pub puzzle_id: PuzzleId,
    /// Player who claimed it.
    pub player_id: PlayerId,
    /// Lowercase word.
    pub word: String,
    /// Length of `word`.
    pub score: u32,
    /// Letters left in the pair's pool after this word, sorted.
    pub remaining_letters: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Submission fields supplied by the caller; the store assigns id and time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSubmission {
    /// Puzzle the word was claimed from.
    pub puzzle_id: PuzzleId,
    /// Player who claimed it.
    pub player_id: PlayerId,
    /// Lowercase word.
    pub word: String,
    /// Length of `word`.
    pub score: u32,
    /// Letters left after this word.
    pub remaining_letters: String,
}
