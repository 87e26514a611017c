//! Clue numbers and sets of clue numbers.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A clue number in the range 1-9.
///
/// Every numbering rule maps a word into this range, so a puzzle's numeric
/// hints are always single digits.
///
/// # Examples
///
/// ```
/// use qiyaas_core::ClueNumber;
///
/// let number = ClueNumber::new(5)?;
/// assert_eq!(number.value(), 5);
/// assert!(ClueNumber::new(0).is_err());
/// assert!(ClueNumber::new(10).is_err());
/// # Ok::<(), qiyaas_core::ClueNumberError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClueNumber(u8);

/// Error returned for a clue number outside 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("clue number must be between 1 and 9, got {_0}")]
pub struct ClueNumberError(#[error(not(source))] pub u8);

impl ClueNumber {
    /// All clue numbers from 1 to 9.
    pub const ALL: [Self; 9] = [
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Creates a clue number.
    ///
    /// # Errors
    ///
    /// Returns [`ClueNumberError`] if `value` is not in 1-9.
    pub const fn new(value: u8) -> Result<Self, ClueNumberError> {
        if value >= 1 && value <= 9 {
            Ok(Self(value))
        } else {
            Err(ClueNumberError(value))
        }
    }

    /// Returns the numeric value (1-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    const fn bit(self) -> u16 {
        1 << (self.0 - 1)
    }
}

impl Display for ClueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl TryFrom<u8> for ClueNumber {
    type Error = ClueNumberError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClueNumber> for u8 {
    fn from(number: ClueNumber) -> u8 {
        number.value()
    }
}

/// A set of clue numbers, stored as a 9-bit mask.
///
/// Bits 0-8 represent numbers 1-9. Iteration yields numbers in ascending
/// order, which keeps random choices over a set reproducible.
///
/// # Examples
///
/// ```
/// use qiyaas_core::{ClueNumber, ClueNumberSet};
///
/// let two = ClueNumber::new(2)?;
/// let three = ClueNumber::new(3)?;
/// let candidates = ClueNumberSet::from_iter([three, two]);
///
/// let mut used = ClueNumberSet::EMPTY;
/// used.insert(two);
///
/// let remaining = candidates.difference(used);
/// assert_eq!(remaining.len(), 1);
/// assert!(remaining.contains(three));
/// assert_eq!(candidates.iter().collect::<Vec<_>>(), vec![two, three]);
/// # Ok::<(), qiyaas_core::ClueNumberError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClueNumberSet {
    bits: u16,
}

impl ClueNumberSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set of all numbers 1-9.
    pub const FULL: Self = Self { bits: 0x1ff };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set holding one number.
    #[must_use]
    pub const fn single(number: ClueNumber) -> Self {
        Self { bits: number.bit() }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no elements.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if `number` is in the set.
    #[must_use]
    pub const fn contains(self, number: ClueNumber) -> bool {
        self.bits & number.bit() != 0
    }

    /// Adds `number`, returning `true` if it was not present.
    pub fn insert(&mut self, number: ClueNumber) -> bool {
        let added = !self.contains(number);
        self.bits |= number.bit();
        added
    }

    /// Returns the numbers in `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns the numbers in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Iterates over the numbers in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ClueNumber> {
        ClueNumber::ALL
            .into_iter()
            .filter(move |number| self.contains(*number))
    }
}

impl FromIterator<ClueNumber> for ClueNumberSet {
    fn from_iter<T: IntoIterator<Item = ClueNumber>>(iter: T) -> Self {
        let mut set = Self::new();
        for number in iter {
            set.insert(number);
        }
        set
    }
}

impl Extend<ClueNumber> for ClueNumberSet {
    fn extend<T: IntoIterator<Item = ClueNumber>>(&mut self, iter: T) {
        for number in iter {
            self.insert(number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: u8) -> ClueNumber {
        ClueNumber::new(value).unwrap()
    }

    #[test]
    fn test_basic_operations() {
        assert_eq!(ClueNumber::ALL.len(), 9);
        assert_eq!(ClueNumber::ALL[0].value(), 1);
        assert_eq!(ClueNumber::ALL[8].value(), 9);
        for number in ClueNumber::ALL {
            assert_eq!(ClueNumber::new(number.value()), Ok(number));
        }
        assert_eq!(format!("{}", n(7)), "7");
        assert_eq!(ClueNumber::new(0), Err(ClueNumberError(0)));
        assert_eq!(
            ClueNumberError(10).to_string(),
            "clue number must be between 1 and 9, got 10"
        );
    }

    #[test]
    fn test_set_operations() {
        let a = ClueNumberSet::from_iter([n(1), n(2), n(3)]);
        let b = ClueNumberSet::from_iter([n(2), n(3), n(4)]);
        assert_eq!(a.union(b).len(), 4);
        assert_eq!(a.difference(b), ClueNumberSet::single(n(1)));
        assert!(a.difference(a).is_empty());
    }

    #[test]
    fn test_insert_reports_new_elements() {
        let mut set = ClueNumberSet::new();
        assert!(set.insert(n(9)));
        assert!(!set.insert(n(9)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration_order() {
        let set = ClueNumberSet::from_iter([n(9), n(1), n(5), n(3)]);
        let values: Vec<_> = set.iter().map(ClueNumber::value).collect();
        assert_eq!(values, vec![1, 3, 5, 9]);
        assert_eq!(ClueNumberSet::FULL.len(), 9);
        assert_eq!(ClueNumberSet::EMPTY.iter().count(), 0);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert_eq!(serde_json::from_str::<ClueNumber>("4").unwrap(), n(4));
        assert!(serde_json::from_str::<ClueNumber>("0").is_err());
        assert_eq!(serde_json::to_string(&n(8)).unwrap(), "8");
    }
}
