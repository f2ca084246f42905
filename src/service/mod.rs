//! Service Layer
//!
//! Configuration and the [`PuzzleEngine`] facade consumed by a transport
//! layer (HTTP handlers, CLI, tests). Everything here is request-scoped;
//! the only long-lived state is the master RNG and the pair lock table.

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::{EngineError, PuzzleEngine, SubmitResult};
