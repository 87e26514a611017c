//! Clues, puzzles and the records they are persisted as.
//!
//! Two record shapes exist:
//!
//! - the daily record, `{"date", "clues": [...]}`, where each clue lists its
//!   type, word, rule, number, length category and word length in display
//!   order;
//! - the batch record, where each round maps `noun`, `verb` and `adjective`
//!   to their word and rule, followed by the clue numbers in that order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ClueNumber, LengthCategory, NumberingRule, PartOfSpeech, Word};

/// One word of a puzzle with the rule and number it is shown with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "ClueRecord", try_from = "ClueRecord")]
pub struct Clue {
    /// The part of speech the word was drawn as.
    pub pos: PartOfSpeech,
    /// The word to guess.
    pub word: Word,
    /// The rule that produced `number`.
    pub rule: NumberingRule,
    /// The clue number shown to the player.
    pub number: ClueNumber,
}

impl Clue {
    /// Returns the length bucket of the clue word.
    #[must_use]
    pub fn length_category(&self) -> LengthCategory {
        self.word.length_category()
    }

    /// Returns the number of letters in the clue word.
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.word.len()
    }
}

#[derive(Serialize, Deserialize)]
struct ClueRecord {
    #[serde(rename = "type")]
    pos: PartOfSpeech,
    word: Word,
    rule: NumberingRule,
    number: ClueNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length_category: Option<LengthCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word_length: Option<usize>,
}

impl From<Clue> for ClueRecord {
    fn from(clue: Clue) -> Self {
        let length_category = Some(clue.length_category());
        let word_length = Some(clue.word_length());
        let Clue {
            pos,
            word,
            rule,
            number,
        } = clue;
        Self {
            pos,
            word,
            rule,
            number,
            length_category,
            word_length,
        }
    }
}

// Length fields are derived from the word, so stored values are informational only.
impl TryFrom<ClueRecord> for Clue {
    type Error = PuzzleError;

    fn try_from(record: ClueRecord) -> Result<Self, Self::Error> {
        if !record.rule.accepts(&record.word, record.number) {
            return Err(PuzzleError::NumberMismatch {
                word: record.word,
                rule: record.rule,
                number: record.number,
            });
        }
        Ok(Self {
            pos: record.pos,
            word: record.word,
            rule: record.rule,
            number: record.number,
        })
    }
}

/// Reasons a set of clues does not form a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    /// Two clues share a part of speech.
    #[display("more than one {_0} clue")]
    RepeatedPartOfSpeech(#[error(not(source))] PartOfSpeech),
    /// Two clues share a numbering rule.
    #[display("more than one clue uses {_0}")]
    RepeatedRule(#[error(not(source))] NumberingRule),
    /// A clue's number is not what its rule gives its word.
    #[display("{rule} does not give {word} the number {number}")]
    NumberMismatch {
        /// The clue word.
        word: Word,
        /// The clue rule.
        rule: NumberingRule,
        /// The claimed number.
        number: ClueNumber,
    },
}

/// A single puzzle round: one noun, one verb and one adjective clue, each
/// numbered by a different rule.
///
/// Clues are stored in [`PartOfSpeech::ALL`] order. Construction checks the
/// structural invariants; pairwise distinct numbers are reported by
/// [`Puzzle::has_distinct_numbers`] because the reroll selection policy can
/// produce puzzles without them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RoundRecord", try_from = "RoundRecord")]
pub struct Puzzle {
    clues: [Clue; 3],
}

impl Puzzle {
    /// Builds a puzzle from three clues given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if two clues share a part of speech or a rule,
    /// or if a clue number does not follow from its rule.
    pub fn new(clues: [Clue; 3]) -> Result<Self, PuzzleError> {
        let mut seen_rules = Vec::with_capacity(3);
        for clue in &clues {
            if seen_rules.contains(&clue.rule) {
                return Err(PuzzleError::RepeatedRule(clue.rule));
            }
            seen_rules.push(clue.rule);
            if !clue.rule.accepts(&clue.word, clue.number) {
                return Err(PuzzleError::NumberMismatch {
                    word: clue.word.clone(),
                    rule: clue.rule,
                    number: clue.number,
                });
            }
        }

        let mut slots: [Option<Clue>; 3] = Default::default();
        for clue in clues {
            let slot = &mut slots[clue.pos.index()];
            if slot.is_some() {
                return Err(PuzzleError::RepeatedPartOfSpeech(clue.pos));
            }
            *slot = Some(clue);
        }
        let [Some(noun), Some(verb), Some(adjective)] = slots else {
            // Three clues with no repeated part of speech fill every slot.
            unreachable!("every part of speech has a clue");
        };
        Ok(Self {
            clues: [noun, verb, adjective],
        })
    }

    /// Returns the clues in noun, verb, adjective order.
    #[must_use]
    pub fn clues(&self) -> &[Clue; 3] {
        &self.clues
    }

    /// Returns the clue for one part of speech.
    #[must_use]
    pub fn clue(&self, pos: PartOfSpeech) -> &Clue {
        &self.clues[pos.index()]
    }

    /// Returns the clue numbers in noun, verb, adjective order.
    #[must_use]
    pub fn numbers(&self) -> [ClueNumber; 3] {
        self.clues.each_ref().map(|clue| clue.number)
    }

    /// Returns the clue words in noun, verb, adjective order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.clues.iter().map(|clue| &clue.word)
    }

    /// Returns `true` if the three clue numbers differ.
    #[must_use]
    pub fn has_distinct_numbers(&self) -> bool {
        let [a, b, c] = self.numbers();
        a != b && b != c && a != c
    }
}

/// Word and rule of one part of speech in a batch round record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    /// The clue word.
    pub word: Word,
    /// The rule that numbers it.
    pub rule: NumberingRule,
}

/// The persisted form of a [`Puzzle`] inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// The noun clue.
    pub noun: RoundEntry,
    /// The verb clue.
    pub verb: RoundEntry,
    /// The adjective clue.
    pub adjective: RoundEntry,
    /// Clue numbers in noun, verb, adjective order.
    pub numbers: [ClueNumber; 3],
}

impl From<Puzzle> for RoundRecord {
    fn from(puzzle: Puzzle) -> Self {
        let numbers = puzzle.numbers();
        let [noun, verb, adjective] = puzzle
            .clues
            .map(|clue| RoundEntry {
                word: clue.word,
                rule: clue.rule,
            });
        Self {
            noun,
            verb,
            adjective,
            numbers,
        }
    }
}

impl TryFrom<RoundRecord> for Puzzle {
    type Error = PuzzleError;

    fn try_from(record: RoundRecord) -> Result<Self, Self::Error> {
        let RoundRecord {
            noun,
            verb,
            adjective,
            numbers: [n, v, a],
        } = record;
        let clue = |pos, entry: RoundEntry, number| Clue {
            pos,
            word: entry.word,
            rule: entry.rule,
            number,
        };
        Self::new([
            clue(PartOfSpeech::Noun, noun, n),
            clue(PartOfSpeech::Verb, verb, v),
            clue(PartOfSpeech::Adjective, adjective, a),
        ])
    }
}

/// All rounds generated for one date.
///
/// Round indices start at 1 and serialize as the round labels `"1"`, `"2"`, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleBatch {
    /// The date the batch was generated for.
    pub date: NaiveDate,
    /// Puzzles keyed by round index.
    pub rounds: BTreeMap<u32, Puzzle>,
}

impl PuzzleBatch {
    /// Iterates over every word used by the batch.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.rounds.values().flat_map(Puzzle::words)
    }
}

/// The single daily puzzle, with clues in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPuzzle {
    /// The puzzle date.
    pub date: NaiveDate,
    /// Clues in the order they are shown.
    pub clues: [Clue; 3],
}

impl DailyPuzzle {
    /// Iterates over the clue words.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.clues.iter().map(|clue| &clue.word)
    }

    /// Validates the clues and returns them as a [`Puzzle`].
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError`] if the clues do not form a puzzle.
    pub fn to_puzzle(&self) -> Result<Puzzle, PuzzleError> {
        Puzzle::new(self.clues.clone())
    }
}
