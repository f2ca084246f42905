//! Letter Multiset
//!
//! A counted bag of characters. This is the only representation the engine
//! uses to reason about which letters a player may still spend.
//!
//! Uses BTreeMap so rendering and iteration are always in character order.

use std::collections::BTreeMap;
use std::fmt;

/// A bag of characters with non-negative counts.
///
/// Characters with a zero count are never stored, so two pools holding the
/// same letters compare equal regardless of how they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterPool {
    counts: BTreeMap<char, u32>,
}

/// Returned when a letter cannot be taken from a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("letter '{0}' is not available")]
pub struct NotAvailable(pub char);

impl LetterPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool counting every character of `s`.
    ///
    /// Callers normalize case before building; no filtering happens here.
    pub fn from_letters(s: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in s.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of occurrences of `c`.
    #[inline]
    pub fn count(&self, c: char) -> u32 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Total number of letters in the pool.
    pub fn len(&self) -> usize {
        self.counts.values().map(|&n| n as usize).sum()
    }

    /// True when no letters remain.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Remove exactly one occurrence of `c`.
    ///
    /// Fails without touching the pool if `c` is absent.
    pub fn subtract_one(&mut self, c: char) -> Result<(), NotAvailable> {
        match self.counts.get_mut(&c) {
            Some(n) if *n > 1 => {
                *n -= 1;
                Ok(())
            }
            Some(_) => {
                self.counts.remove(&c);
                Ok(())
            }
            None => Err(NotAvailable(c)),
        }
    }

    /// Whether every letter of `word` is covered, counting repeats.
    ///
    /// A single whole-word check; the pool is not modified.
    pub fn can_afford(&self, word: &str) -> bool {
        let needed = Self::from_letters(word);
        needed
            .counts
            .iter()
            .all(|(&c, &n)| self.count(c) >= n)
    }

    /// Remove one occurrence per character of `word`, all or nothing.
    ///
    /// On failure the pool is unchanged and the first missing letter
    /// (in character order) is reported.
    pub fn subtract_word(&mut self, word: &str) -> Result<(), NotAvailable> {
        if !self.can_afford(word) {
            let needed = Self::from_letters(word);
            let missing = needed
                .counts
                .iter()
                .find(|&(&c, &n)| self.count(c) < n)
                .map(|(&c, _)| c)
                .unwrap_or_default();
            return Err(NotAvailable(missing));
        }
        for c in word.chars() {
            self.subtract_one(c)?;
        }
        Ok(())
    }

    /// Add every letter of `other` into this pool.
    pub fn merge(&mut self, other: &LetterPool) {
        for (&c, &n) in &other.counts {
            *self.counts.entry(c).or_insert(0) += n;
        }
    }

    /// Iterate `(letter, count)` in character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

impl fmt::Display for LetterPool {
    /// Sorted rendering with each letter repeated by its count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (&c, &n) in &self.counts {
            for _ in 0..n {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl From<&str> for LetterPool {
    fn from(s: &str) -> Self {
        Self::from_letters(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
