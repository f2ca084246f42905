//! # Code Unscramble
//!
//! Letter-pool puzzle engine. A player receives a scrambled "code" built
//! from a few source words and claims dictionary words from the letters
//! not yet spent. Every accepted word consumes its letters for good.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CODE UNSCRAMBLE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── letters.rs  - Letter multiset                           │
//! │                                                              │
//! │  puzzle/         - Engine logic (no I/O of its own)          │
//! │  ├── state.rs    - Ids, puzzle and submission records        │
//! │  ├── generator.rs- Letter pool generation                    │
//! │  ├── validator.rs- Submission checks                         │
//! │  ├── ledger.rs   - Per-pair submission history               │
//! │  └── scoring.rs  - Totals and leaderboard                    │
//! │                                                              │
//! │  oracle/         - Word source + dictionary ports/adapters   │
//! │  store/          - Persistence port + in-memory store        │
//! │  service/        - Config and the PuzzleEngine facade        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - A puzzle's letters never change after creation.
//! - For each (player, puzzle) pair, original letters equal the accepted
//!   words' letters plus the remaining letters.
//! - A word is accepted at most once per pair.
//! - All randomness comes from a seeded [`DeterministicRng`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod oracle;
pub mod puzzle;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use core::letters::LetterPool;
pub use core::rng::DeterministicRng;
pub use puzzle::{LeaderboardEntry, PlayerId, Puzzle, PuzzleId, Rejection, ScoreSummary};
pub use service::{EngineConfig, EngineError, PuzzleEngine, SubmitResult};
pub use store::{MemoryStore, PuzzleStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
