//! The record of words already spent by past puzzles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Word;

/// Words consumed by earlier puzzles.
///
/// The ledger only grows. It is owned by the caller driving generation and
/// handed to the selector as a read-only exclusion set; the caller appends the
/// words of a puzzle once the whole run has succeeded.
///
/// Serialized as `{"used_words": [...]}` with the words sorted, so saving
/// the same ledger twice produces identical files.
///
/// # Examples
///
/// ```
/// use qiyaas_core::{UsageLedger, Word};
///
/// let mut ledger = UsageLedger::new();
/// let word: Word = "apple".parse()?;
/// assert!(ledger.insert(word.clone()));
/// assert!(!ledger.insert(word.clone()));
/// assert!(ledger.contains(&word));
/// assert_eq!(ledger.len(), 1);
/// # Ok::<(), qiyaas_core::WordError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    #[serde(default)]
    used_words: BTreeSet<Word>,
}

impl UsageLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `word` has been used.
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.used_words.contains(word)
    }

    /// Records `word` as used, returning `true` if it was new.
    pub fn insert(&mut self, word: Word) -> bool {
        self.used_words.insert(word)
    }

    /// Returns the number of used words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used_words.len()
    }

    /// Returns `true` if no word has been used yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used_words.is_empty()
    }

    /// Iterates over the used words in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.used_words.iter()
    }
}

impl Extend<Word> for UsageLedger {
    fn extend<T: IntoIterator<Item = Word>>(&mut self, iter: T) {
        self.used_words.extend(iter);
    }
}

impl FromIterator<Word> for UsageLedger {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Self {
            used_words: iter.into_iter().collect(),
        }
    }
}
