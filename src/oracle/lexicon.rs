//! Local word list.
//!
//! A lexicon directory holds `lexicon.txt` (one word per line) and optional
//! `insertions.txt` / `exclusions.txt` overrides. Words are stored
//! lowercase in a BTreeSet so candidate order is stable across runs.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use super::{Dictionary, OracleError, WordSource};

/// In-process word list.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    words: BTreeSet<String>,
}

impl Lexicon {
    /// Build from an iterator of words. Blank entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Load `lexicon.txt` from `dir`, then apply insertions and exclusions.
    ///
    /// A missing main list is an error; missing override files are not.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, OracleError> {
        let dir = dir.as_ref();
        let mut lexicon = Self {
            words: read_words(&dir.join("lexicon.txt"))?,
        };

        match read_words(&dir.join("insertions.txt")) {
            Ok(inserted) => {
                info!(count = inserted.len(), "lexicon insertions applied");
                lexicon.words.extend(inserted);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "failed to read lexicon insertions"),
        }

        match read_words(&dir.join("exclusions.txt")) {
            Ok(excluded) => {
                info!(count = excluded.len(), "lexicon exclusions applied");
                for word in &excluded {
                    lexicon.words.remove(word);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "failed to read lexicon exclusions"),
        }

        info!(dir = %dir.display(), total = lexicon.len(), "lexicon loaded");
        Ok(lexicon)
    }

    /// Whether the lexicon contains `word` (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the lexicon has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn read_words(path: &Path) -> io::Result<BTreeSet<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_lowercase());
        }
    }
    Ok(words)
}

impl WordSource for Lexicon {
    async fn fetch_candidate_words(&self) -> Result<Vec<String>, OracleError> {
        Ok(self.words.iter().cloned().collect())
    }
}

impl Dictionary for Lexicon {
    async fn is_real_word(&self, word: &str) -> Result<bool, OracleError> {
        Ok(self.contains(word))
    }
}
