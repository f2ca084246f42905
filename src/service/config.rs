//! Engine configuration.

use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::puzzle::generator::SOURCE_WORD_LENGTHS;
use crate::puzzle::scoring::DEFAULT_LEADERBOARD_LIMIT;
use crate::puzzle::validator::MIN_WORD_LEN;

/// Tunables for [`PuzzleEngine`](super::PuzzleEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Source words per puzzle when the caller does not say.
    pub default_word_count: usize,
    /// Shortest word a player may submit.
    pub min_word_len: usize,
    /// Accepted source word lengths.
    pub source_word_lengths: RangeInclusive<usize>,
    /// Bound on every word source / dictionary call.
    pub external_timeout: Duration,
    /// Leaderboard size when the caller does not say.
    pub leaderboard_limit: usize,
    /// Master RNG seed. `None` draws one from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_word_count: 3,
            min_word_len: MIN_WORD_LEN,
            source_word_lengths: SOURCE_WORD_LENGTHS,
            external_timeout: Duration::from_secs(5),
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    ///
    /// Unset variables keep their defaults; unparseable ones are logged
    /// and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_word_count: env_parse("PUZZLE_WORD_COUNT").unwrap_or(defaults.default_word_count),
            min_word_len: env_parse("PUZZLE_MIN_WORD_LEN").unwrap_or(defaults.min_word_len),
            source_word_lengths: defaults.source_word_lengths,
            external_timeout: env_parse("PUZZLE_EXTERNAL_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.external_timeout),
            leaderboard_limit: env_parse("PUZZLE_LEADERBOARD_LIMIT").unwrap_or(defaults.leaderboard_limit),
            rng_seed: env_parse("PUZZLE_RNG_SEED"),
        }
    }

    /// Same config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}
