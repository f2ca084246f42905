//! External Collaborators
//!
//! Ports for the two outside services the engine consults, plus adapters.
//! These are **best-effort**: the engine bounds every call with a timeout
//! and absorbs failures (fallback word list, fail-closed validation).
//!
//! - `lexicon`: in-process word list, usable as both source and dictionary
//! - `http`: clients for the public random-word and dictionary APIs

pub mod http;
pub mod lexicon;

use std::future::Future;

use thiserror::Error;

pub use http::{DictionaryApi, HttpOracleConfig, RandomWordApi};
pub use lexicon::Lexicon;

/// Collaborator failures. Never surfaced to engine callers.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The service is not configured or deliberately disabled.
    #[error("service unavailable")]
    Unavailable,

    /// Transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with something we cannot interpret.
    #[error("unexpected response: {0}")]
    BadResponse(String),

    /// Reading a local word list failed.
    #[error("word list I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplies candidate words for puzzle generation.
pub trait WordSource: Send + Sync {
    /// Fetch candidate words. No ordering or filtering guarantee.
    fn fetch_candidate_words(&self) -> impl Future<Output = Result<Vec<String>, OracleError>> + Send;
}

/// Decides whether a string is a real word.
pub trait Dictionary: Send + Sync {
    /// Whether `word` (lowercase) is a real word.
    fn is_real_word(&self, word: &str) -> impl Future<Output = Result<bool, OracleError>> + Send;
}

/// Adapter that always fails. Forces the fallback and fail-closed paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unavailable;

impl WordSource for Unavailable {
    async fn fetch_candidate_words(&self) -> Result<Vec<String>, OracleError> {
        Err(OracleError::Unavailable)
    }
}

impl Dictionary for Unavailable {
    async fn is_real_word(&self, _word: &str) -> Result<bool, OracleError> {
        Err(OracleError::Unavailable)
    }
}
