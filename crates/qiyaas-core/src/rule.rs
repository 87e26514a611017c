//! Numbering rules that turn a puzzle word into its clue number.
//!
//! A puzzle shows three words and three numbers; the player has to work out
//! which rule produced which number. The registry is fixed:
//!
//! | rule            | eligible words                 | number                                  |
//! |-----------------|--------------------------------|-----------------------------------------|
//! | `length_rule`   | any                            | `len mod 9`, with 0 reported as 9       |
//! | `alphabet_rule` | first letter `A`-`I`           | alphabet position of the first letter   |
//! | `letter_rule`   | first letter in `OTFSEN`       | number word starting with that letter   |
//!
//! `letter_rule` is ambiguous for `T` (two/three), `F` (four/five) and `S`
//! (six/seven). It returns every candidate and leaves the choice to the
//! puzzle selector.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{ClueNumber, ClueNumberSet, Word};

/// One of the three clue numbering rules.
///
/// # Examples
///
/// ```
/// use qiyaas_core::{ClueNumber, NumberingRule, Word};
///
/// let word: Word = "TRAIN".parse()?;
/// assert!(!NumberingRule::AlphabetRule.is_eligible(&word));
///
/// let numbers = NumberingRule::LetterRule.apply(&word).unwrap();
/// let values: Vec<u8> = numbers.iter().map(ClueNumber::value).collect();
/// assert_eq!(values, vec![2, 3]);
/// # Ok::<(), qiyaas_core::WordError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingRule {
    /// Word length folded into 1-9.
    LengthRule,
    /// Alphabet position of the first letter, for words starting with `A`-`I`.
    AlphabetRule,
    /// Number words spelled from the first letter, for words starting with `O`, `T`, `F`, `S`, `E` or `N`.
    LetterRule,
}

/// Error returned when parsing an unknown rule name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown numbering rule: {_0:?}")]
pub struct ParseRuleError(#[error(not(source))] pub String);

const NUMBER_WORD_INITIALS: &[u8] = b"OTFSEN";

impl NumberingRule {
    /// All rules, in registry order.
    pub const ALL: [Self; 3] = [Self::LengthRule, Self::AlphabetRule, Self::LetterRule];

    /// Returns the registry in its fixed order.
    #[must_use]
    pub fn list_rules() -> &'static [Self] {
        &Self::ALL
    }

    /// Returns the rule name used in puzzle records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LengthRule => "length_rule",
            Self::AlphabetRule => "alphabet_rule",
            Self::LetterRule => "letter_rule",
        }
    }

    /// Returns `true` if this rule can number `word`.
    #[must_use]
    pub fn is_eligible(self, word: &Word) -> bool {
        let first = word.first_letter();
        match self {
            Self::LengthRule => true,
            Self::AlphabetRule => (b'A'..=b'I').contains(&first),
            Self::LetterRule => NUMBER_WORD_INITIALS.contains(&first),
        }
    }

    /// Returns the candidate clue numbers for `word`, or `None` if the word is
    /// not eligible for this rule.
    ///
    /// The set has a single element except for `letter_rule` words starting
    /// with `T`, `F` or `S`.
    #[must_use]
    pub fn apply(self, word: &Word) -> Option<ClueNumberSet> {
        if !self.is_eligible(word) {
            return None;
        }
        let first = word.first_letter();
        let (low, high) = match self {
            Self::LengthRule => {
                let folded = word.len() % 9;
                let value = if folded == 0 { 9 } else { folded };
                let value = u8::try_from(value).ok()?;
                (value, value)
            }
            Self::AlphabetRule => {
                let value = first - b'A' + 1;
                (value, value)
            }
            Self::LetterRule => match first {
                b'O' => (1, 1),
                b'T' => (2, 3),
                b'F' => (4, 5),
                b'S' => (6, 7),
                b'E' => (8, 8),
                b'N' => (9, 9),
                _ => return None,
            },
        };
        (low..=high)
            .map(|value| ClueNumber::new(value).ok())
            .collect::<Option<ClueNumberSet>>()
    }

    /// Returns `true` if `number` is one of the numbers this rule gives `word`.
    #[must_use]
    pub fn accepts(self, word: &Word, number: ClueNumber) -> bool {
        self.apply(word).is_some_and(|set| set.contains(number))
    }
}

impl Display for NumberingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumberingRule {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| ParseRuleError(s.to_owned()))
    }
}

/// Returns the fixed rule registry. Shorthand for [`NumberingRule::list_rules`].
#[must_use]
pub fn list_rules() -> &'static [NumberingRule] {
    NumberingRule::list_rules()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn values(set: ClueNumberSet) -> Vec<u8> {
        set.iter().map(ClueNumber::value).collect()
    }

    #[test]
    fn test_length_rule_wraps_nine() {
        let rule = NumberingRule::LengthRule;
        assert_eq!(values(rule.apply(&word("APPLE")).unwrap()), vec![5]);
        assert_eq!(values(rule.apply(&word("ABCDEFGHI")).unwrap()), vec![9]);
        assert_eq!(values(rule.apply(&word("EAT")).unwrap()), vec![3]);
        assert_eq!(values(rule.apply(&word("ABCDEFGH")).unwrap()), vec![8]);
    }

    #[test]
    fn test_alphabet_rule() {
        let rule = NumberingRule::AlphabetRule;
        assert_eq!(values(rule.apply(&word("APPLE")).unwrap()), vec![1]);
        assert_eq!(values(rule.apply(&word("EAT")).unwrap()), vec![5]);
        assert_eq!(values(rule.apply(&word("ISLAND")).unwrap()), vec![9]);
        assert_eq!(rule.apply(&word("JUMP")), None);
        assert_eq!(rule.apply(&word("ODD")), None);
    }

    #[test]
    fn test_letter_rule() {
        let rule = NumberingRule::LetterRule;
        for (w, expected) in [
            ("ODD", vec![1]),
            ("TALL", vec![2, 3]),
            ("FIND", vec![4, 5]),
            ("SEVEN", vec![6, 7]),
            ("EAT", vec![8]),
            ("NICE", vec![9]),
        ] {
            assert_eq!(values(rule.apply(&word(w)).unwrap()), expected, "{w}");
        }
        assert_eq!(rule.apply(&word("APPLE")), None);
        assert!(!rule.is_eligible(&word("BIRD")));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(list_rules().len(), 3);
        for rule in NumberingRule::ALL {
            assert_eq!(rule.name().parse::<NumberingRule>(), Ok(rule));
            assert_eq!(
                serde_json::to_string(&rule).unwrap(),
                format!("\"{}\"", rule.name())
            );
        }
        assert_eq!(
            "number_rule".parse::<NumberingRule>(),
            Err(ParseRuleError("number_rule".to_owned()))
        );
    }

    #[test]
    fn test_accepts() {
        assert!(NumberingRule::LetterRule.accepts(&word("FIND"), ClueNumber::new(5).unwrap()));
        assert!(!NumberingRule::LetterRule.accepts(&word("FIND"), ClueNumber::new(6).unwrap()));
        assert!(!NumberingRule::AlphabetRule.accepts(&word("TALL"), ClueNumber::new(2).unwrap()));
    }

    proptest! {
        #[test]
        fn prop_eligible_words_get_numbers(s in "[A-Z]{3,9}") {
            let w = word(&s);
            for rule in NumberingRule::ALL {
                let numbers = rule.apply(&w);
                prop_assert_eq!(numbers.is_some(), rule.is_eligible(&w));
                if let Some(numbers) = numbers {
                    prop_assert!(!numbers.is_empty());
                    prop_assert!(numbers.len() <= 2);
                }
            }
        }
    }
}
