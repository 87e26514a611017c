//! Puzzle words and their classification.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// An uppercase puzzle word of 3 to 9 ASCII letters.
///
/// Words are compared by their canonical uppercase form, so `"apple"` and
/// `"APPLE"` construct equal values.
///
/// # Examples
///
/// ```
/// use qiyaas_core::{LengthCategory, Word};
///
/// let word: Word = "apple".parse()?;
/// assert_eq!(word.as_str(), "APPLE");
/// assert_eq!(word.len(), 5);
/// assert_eq!(word.first_letter(), b'A');
/// assert_eq!(word.length_category(), LengthCategory::Short);
/// # Ok::<(), qiyaas_core::WordError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

/// Errors returned when a string is not a valid puzzle word.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WordError {
    /// The word is shorter than 3 or longer than 9 letters.
    #[display("word {word:?} has {len} letters, expected 3 to 9")]
    InvalidLength {
        /// The rejected input.
        word: String,
        /// Its length in characters.
        len: usize,
    },
    /// The word contains a character that is not an ASCII letter.
    #[display("word {word:?} contains non-letter character {ch:?}")]
    InvalidCharacter {
        /// The rejected input.
        word: String,
        /// The first offending character.
        ch: char,
    },
}

impl Word {
    /// The minimum number of letters in a word.
    pub const MIN_LEN: usize = 3;
    /// The maximum number of letters in a word.
    pub const MAX_LEN: usize = 9;

    /// Creates a word, converting it to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`WordError`] if `word` is not made of 3 to 9 ASCII letters.
    pub fn new(word: &str) -> Result<Self, WordError> {
        if let Some(ch) = word.chars().find(|ch| !ch.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacter {
                word: word.to_owned(),
                ch,
            });
        }
        let len = word.len();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(WordError::InvalidLength {
                word: word.to_owned(),
                len,
            });
        }
        Ok(Self(word.to_ascii_uppercase()))
    }

    /// Returns the canonical uppercase spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of letters.
    #[must_use]
    #[expect(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first letter as an uppercase ASCII byte.
    #[must_use]
    pub fn first_letter(&self) -> u8 {
        // Construction guarantees at least three ASCII letters.
        self.0.as_bytes()[0]
    }

    /// Returns the length bucket this word falls into.
    #[must_use]
    pub fn length_category(&self) -> LengthCategory {
        LengthCategory::of_len(self.len())
            .unwrap_or_else(|| unreachable!("word length is validated on construction"))
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// The grammatical category a puzzle word is drawn from.
///
/// Clue records spell these in uppercase (`"NOUN"`), while the classified
/// vocabulary source keys them in lowercase (see [`PartOfSpeech::source_key`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    /// A noun.
    #[display("NOUN")]
    Noun,
    /// A verb.
    #[display("VERB")]
    Verb,
    /// An adjective.
    #[display("ADJECTIVE")]
    Adjective,
}

impl PartOfSpeech {
    /// All parts of speech, in the order puzzle records list them.
    pub const ALL: [Self; 3] = [Self::Noun, Self::Verb, Self::Adjective];

    /// Returns the lowercase key used by the classified vocabulary source.
    #[must_use]
    pub const fn source_key(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
        }
    }

    /// Looks up a part of speech by its vocabulary source key.
    #[must_use]
    pub fn from_source_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pos| pos.source_key() == key)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Word length buckets used to spread short, medium and long words across a puzzle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum LengthCategory {
    /// 3 to 5 letters.
    #[display("short")]
    Short,
    /// 6 or 7 letters.
    #[display("medium")]
    Medium,
    /// 8 or 9 letters.
    #[display("long")]
    Long,
}

impl LengthCategory {
    /// All categories from shortest to longest.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Returns the category of a word with `len` letters, if it is a valid word length.
    ///
    /// # Examples
    ///
    /// ```
    /// use qiyaas_core::LengthCategory;
    ///
    /// assert_eq!(LengthCategory::of_len(5), Some(LengthCategory::Short));
    /// assert_eq!(LengthCategory::of_len(6), Some(LengthCategory::Medium));
    /// assert_eq!(LengthCategory::of_len(9), Some(LengthCategory::Long));
    /// assert_eq!(LengthCategory::of_len(10), None);
    /// ```
    #[must_use]
    pub fn of_len(len: usize) -> Option<Self> {
        match len {
            3..=5 => Some(Self::Short),
            6..=7 => Some(Self::Medium),
            8..=9 => Some(Self::Long),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_uppercased() {
        let word = Word::new("Train").unwrap();
        assert_eq!(word.as_str(), "TRAIN");
        assert_eq!(word, Word::new("TRAIN").unwrap());
        assert_eq!(word.to_string(), "TRAIN");
    }

    #[test]
    fn test_word_length_bounds() {
        assert!(Word::new("ABC").is_ok());
        assert!(Word::new("ABCDEFGHI").is_ok());
        assert_eq!(
            Word::new("AB"),
            Err(WordError::InvalidLength {
                word: "AB".to_owned(),
                len: 2
            })
        );
        assert!(matches!(
            Word::new("ABCDEFGHIJ"),
            Err(WordError::InvalidLength { len: 10, .. })
        ));
    }

    #[test]
    fn test_word_rejects_non_letters() {
        assert!(matches!(
            Word::new("CAN'T"),
            Err(WordError::InvalidCharacter { ch: '\'', .. })
        ));
        assert!(matches!(
            Word::new("ÉCLAIR"),
            Err(WordError::InvalidCharacter { ch: 'É', .. })
        ));
    }

    #[test]
    fn test_word_serde() {
        let word: Word = serde_json::from_str("\"odd\"").unwrap();
        assert_eq!(word.as_str(), "ODD");
        assert_eq!(serde_json::to_string(&word).unwrap(), "\"ODD\"");
        assert!(serde_json::from_str::<Word>("\"no\"").is_err());
    }

    #[test]
    fn test_length_category_boundaries() {
        for (len, expected) in [
            (3, LengthCategory::Short),
            (5, LengthCategory::Short),
            (6, LengthCategory::Medium),
            (7, LengthCategory::Medium),
            (8, LengthCategory::Long),
            (9, LengthCategory::Long),
        ] {
            assert_eq!(LengthCategory::of_len(len), Some(expected), "len {len}");
        }
        assert_eq!(LengthCategory::of_len(2), None);
    }

    #[test]
    fn test_part_of_speech_keys() {
        for pos in PartOfSpeech::ALL {
            assert_eq!(PartOfSpeech::from_source_key(pos.source_key()), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_source_key("adverb"), None);
        assert_eq!(
            serde_json::to_string(&PartOfSpeech::Adjective).unwrap(),
            "\"ADJECTIVE\""
        );
        assert_eq!(
            serde_json::to_string(&LengthCategory::Medium).unwrap(),
            "\"medium\""
        );
    }
}
