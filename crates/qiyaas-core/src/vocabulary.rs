//! The classified vocabulary puzzles are drawn from.
//!
//! The vocabulary arrives pre-classified from the word-list tooling as a JSON
//! object mapping `"noun"`, `"verb"` and `"adjective"` to word arrays. This
//! module validates that record and indexes it by part of speech and,
//! optionally, by [`LengthCategory`].

use std::collections::{BTreeMap, HashMap};

use crate::{LengthCategory, PartOfSpeech, Word, WordError};

/// The raw classified vocabulary, keyed by lowercase part-of-speech name.
///
/// Keys other than `noun`, `verb` and `adjective` are ignored.
pub type VocabularySource = BTreeMap<String, Vec<String>>;

/// Whether a [`VocabularyIndex`] is also partitioned by word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bucketing {
    /// One sequence per part of speech.
    #[default]
    Flat,
    /// Additionally partitioned into short, medium and long words. Every
    /// (part of speech, length) bucket must be non-empty.
    ByLength,
}

/// Errors detected while building a [`VocabularyIndex`].
///
/// Any of these means the source is malformed; no partial index is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum VocabularyError {
    /// A part of speech is missing or has no words.
    #[display("vocabulary has no {_0} words")]
    MissingCategory(#[error(not(source))] PartOfSpeech),
    /// A length bucket required by [`Bucketing::ByLength`] is empty.
    #[display("vocabulary has no {category} {pos} words")]
    EmptyBucket {
        /// The part of speech.
        pos: PartOfSpeech,
        /// The empty length bucket.
        category: LengthCategory,
    },
    /// A token is not a valid puzzle word.
    #[display("invalid {pos} entry: {source}")]
    InvalidWord {
        /// The list the token was found in.
        pos: PartOfSpeech,
        /// Why the token was rejected.
        source: WordError,
    },
    /// A word is listed under more than one part of speech.
    #[display("{word} is listed as both {first} and {second}")]
    DuplicateWord {
        /// The repeated word.
        word: Word,
        /// The part of speech it was first seen under.
        first: PartOfSpeech,
        /// The conflicting part of speech.
        second: PartOfSpeech,
    },
}

/// Words indexed by part of speech and length bucket.
///
/// The index is immutable once built and is shared by every round of a
/// generation run. Word order follows the source, so the same source always
/// yields the same candidate pools.
///
/// # Examples
///
/// ```
/// use qiyaas_core::{Bucketing, PartOfSpeech, VocabularyIndex, VocabularySource};
///
/// let source: VocabularySource = [
///     ("noun", vec!["apple", "train"]),
///     ("verb", vec!["eat", "find"]),
///     ("adjective", vec!["odd", "tall"]),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_owned(), v.into_iter().map(str::to_owned).collect()))
/// .collect();
///
/// let index = VocabularyIndex::new(&source, Bucketing::Flat)?;
/// let verbs: Vec<_> = index
///     .words_of(PartOfSpeech::Verb, None)
///     .iter()
///     .map(|w| w.as_str())
///     .collect();
/// assert_eq!(verbs, ["EAT", "FIND"]);
/// # Ok::<(), qiyaas_core::VocabularyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    bucketing: Bucketing,
    words: [Vec<Word>; 3],
    buckets: [[Vec<Word>; 3]; 3],
    lookup: HashMap<Word, PartOfSpeech>,
}

impl VocabularyIndex {
    /// Validates `source` and builds the index.
    ///
    /// Upper- and lowercase spellings are treated as the same word; repeats
    /// within one list keep their first position.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError`] if a part of speech is missing, a token is
    /// invalid, a word is classified twice, or (with [`Bucketing::ByLength`])
    /// a length bucket is empty.
    pub fn new(source: &VocabularySource, bucketing: Bucketing) -> Result<Self, VocabularyError> {
        for key in source.keys() {
            if PartOfSpeech::from_source_key(key).is_none() {
                log::warn!("ignoring unknown vocabulary category {key:?}");
            }
        }

        let mut words: [Vec<Word>; 3] = Default::default();
        let mut buckets: [[Vec<Word>; 3]; 3] = Default::default();
        let mut lookup = HashMap::new();

        for pos in PartOfSpeech::ALL {
            let tokens = source
                .get(pos.source_key())
                .filter(|tokens| !tokens.is_empty())
                .ok_or(VocabularyError::MissingCategory(pos))?;
            for token in tokens {
                let word = Word::new(token)
                    .map_err(|source| VocabularyError::InvalidWord { pos, source })?;
                match lookup.get(&word) {
                    Some(&first) if first == pos => continue,
                    Some(&first) => {
                        return Err(VocabularyError::DuplicateWord {
                            word,
                            first,
                            second: pos,
                        });
                    }
                    None => {}
                }
                lookup.insert(word.clone(), pos);
                buckets[pos.index()][word.length_category().index()].push(word.clone());
                words[pos.index()].push(word);
            }
        }

        if bucketing == Bucketing::ByLength {
            for pos in PartOfSpeech::ALL {
                for category in LengthCategory::ALL {
                    if buckets[pos.index()][category.index()].is_empty() {
                        return Err(VocabularyError::EmptyBucket { pos, category });
                    }
                }
            }
        }

        log::debug!(
            "vocabulary indexed: {} nouns, {} verbs, {} adjectives",
            words[PartOfSpeech::Noun.index()].len(),
            words[PartOfSpeech::Verb.index()].len(),
            words[PartOfSpeech::Adjective.index()].len(),
        );

        Ok(Self {
            bucketing,
            words,
            buckets,
            lookup,
        })
    }

    /// Returns the words of one part of speech, optionally restricted to a
    /// length bucket, in source order.
    #[must_use]
    pub fn words_of(&self, pos: PartOfSpeech, category: Option<LengthCategory>) -> &[Word] {
        match category {
            None => &self.words[pos.index()],
            Some(category) => &self.buckets[pos.index()][category.index()],
        }
    }

    /// Returns the part of speech `word` is classified under, if any.
    #[must_use]
    pub fn part_of_speech(&self, word: &Word) -> Option<PartOfSpeech> {
        self.lookup.get(word).copied()
    }

    /// Returns the bucketing this index was validated for.
    #[must_use]
    pub fn bucketing(&self) -> Bucketing {
        self.bucketing
    }

    /// Returns the total number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns `true` if the index holds no words. A successfully built
    /// index is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}
