//! Puzzle Generation
//!
//! Turns a handful of source words into a scrambled letter pool.
//!
//! Generation is a pure function of the candidate list and the RNG, so the
//! same seed and candidates always produce the same puzzle. Fetching the
//! candidates (and bounding that call) is the engine's job.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::core::rng::DeterministicRng;

/// Built-in words used when the external word source cannot supply enough.
pub const FALLBACK_WORDS: [&str; 32] = [
    "code", "word", "love", "help", "team", "test", "game", "play",
    "work", "life", "time", "data", "task", "plan", "kind", "mind",
    "good", "best", "true", "make", "take", "like", "know", "have",
    "move", "jump", "walk", "run", "fly", "swim", "sing", "read",
];

/// Largest word count any generation can honor: the fallback list size.
pub const MAX_WORD_COUNT: usize = FALLBACK_WORDS.len();

/// Default length range for source words.
pub const SOURCE_WORD_LENGTHS: RangeInclusive<usize> = 3..=5;

/// Output of a generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// Words whose letters make up the pool, in draw order.
    pub source_words: Vec<String>,
    /// Uniformly shuffled concatenation of `source_words`.
    pub letters: String,
    /// True when the built-in list was used.
    pub used_fallback: bool,
}

/// Builds letter pools from source words.
#[derive(Clone, Debug)]
pub struct PuzzleGenerator {
    word_lengths: RangeInclusive<usize>,
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new(SOURCE_WORD_LENGTHS)
    }
}

impl PuzzleGenerator {
    /// Create a generator accepting source words with lengths in `word_lengths`.
    pub fn new(word_lengths: RangeInclusive<usize>) -> Self {
        Self { word_lengths }
    }

    /// Keep alphabetic candidates of an acceptable length, lowercased.
    pub fn filter_candidates<I, S>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                let alphabetic = !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic());
                (alphabetic && self.word_lengths.contains(&word.len()))
                    .then(|| word.to_ascii_lowercase())
            })
            .collect()
    }

    /// Generate a puzzle from `word_count` source words.
    ///
    /// `candidates` is whatever the word source returned, or `None` if it
    /// failed. Too few usable candidates switches to [`FALLBACK_WORDS`].
    /// Words are drawn without replacement; callers keep `word_count`
    /// within `1..=MAX_WORD_COUNT`.
    pub fn generate(
        &self,
        candidates: Option<Vec<String>>,
        word_count: usize,
        rng: &mut DeterministicRng,
    ) -> GeneratedPuzzle {
        let usable = candidates
            .map(|words| self.filter_candidates(words))
            .unwrap_or_default();

        let (source_words, used_fallback) = if usable.len() >= word_count {
            (rng.sample(&usable, word_count), false)
        } else {
            debug!(
                usable = usable.len(),
                wanted = word_count,
                "not enough source candidates, using fallback list"
            );
            let fallback: Vec<String> = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
            (rng.sample(&fallback, word_count), true)
        };

        let mut letters: Vec<char> = source_words.iter().flat_map(|w| w.chars()).collect();
        rng.shuffle(&mut letters);

        GeneratedPuzzle {
            source_words,
            letters: letters.into_iter().collect(),
            used_fallback,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
