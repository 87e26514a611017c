//! Core data structures for the Qiyaas word puzzle.
//!
//! A Qiyaas puzzle shows three words (a noun, a verb and an adjective) and
//! three clue numbers. Each number comes from a different
//! [`NumberingRule`] applied to one of the words, and the three numbers are
//! distinct. This crate defines the vocabulary, rule and record types shared
//! by the generator, the store and the command-line tool.
//!
//! # Overview
//!
//! - [`word`]: [`Word`], [`PartOfSpeech`] and [`LengthCategory`]
//! - [`number`]: [`ClueNumber`] (1-9) and [`ClueNumberSet`]
//! - [`rule`]: the fixed [`NumberingRule`] registry
//! - [`vocabulary`]: the classified [`VocabularyIndex`]
//! - [`ledger`]: the [`UsageLedger`] of words spent by earlier puzzles
//! - [`puzzle`]: [`Clue`], [`Puzzle`], [`PuzzleBatch`] and [`DailyPuzzle`] records
//!
//! # Examples
//!
//! ```
//! use qiyaas_core::{NumberingRule, Word};
//!
//! let word: Word = "apple".parse()?;
//! let numbers = NumberingRule::LengthRule.apply(&word).unwrap();
//! assert_eq!(numbers.iter().next().map(|n| n.value()), Some(5));
//! # Ok::<(), qiyaas_core::WordError>(())
//! ```

pub mod ledger;
pub mod number;
pub mod puzzle;
pub mod rule;
pub mod vocabulary;
pub mod word;

pub use self::{
    ledger::UsageLedger,
    number::{ClueNumber, ClueNumberError, ClueNumberSet},
    puzzle::{Clue, DailyPuzzle, Puzzle, PuzzleBatch, PuzzleError, RoundEntry, RoundRecord},
    rule::{NumberingRule, ParseRuleError, list_rules},
    vocabulary::{Bucketing, VocabularyError, VocabularyIndex, VocabularySource},
    word::{LengthCategory, PartOfSpeech, Word, WordError},
};
