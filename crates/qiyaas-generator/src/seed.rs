use std::{
    fmt::{self, Display},
    str::FromStr,
};

use chrono::{Datelike as _, NaiveDate};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};

/// A 256-bit seed for reproducible puzzle selection.
///
/// Every selection seeds its own [`Pcg64`] from one of these, so the same
/// seed and vocabulary always produce the same puzzle. Seeds print as 64
/// lowercase hex digits and parse back from the same form.
///
/// # Examples
///
/// ```
/// use qiyaas_generator::PuzzleSeed;
///
/// let seed = PuzzleSeed::from_u64(20250101);
/// let parsed: PuzzleSeed = seed.to_string().parse()?;
/// assert_eq!(seed, parsed);
/// assert_ne!(seed, PuzzleSeed::from_u64(20250102));
/// # Ok::<(), qiyaas_generator::ParsePuzzleSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

/// Error returned when parsing a seed that is not 64 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("puzzle seed must be 64 hex digits, got {_0:?}")]
pub struct ParsePuzzleSeedError(#[error(not(source))] pub String);

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives a seed from an integer by hashing its little-endian bytes.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(Sha256::digest(value.to_le_bytes()).into())
    }

    /// Derives a seed from an arbitrary label by hashing its UTF-8 bytes.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self(Sha256::digest(label.as_bytes()).into())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub(crate) fn rng(self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl From<u64> for PuzzleSeed {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for PuzzleSeed {
    type Err = ParsePuzzleSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePuzzleSeedError(s.to_owned());
        if s.len() != 64 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).map_err(|_| err())?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| err())?;
        }
        Ok(Self(bytes))
    }
}

/// Returns the base seed of a date: its `YYYYMMDD` digits read as an integer.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use qiyaas_generator::date_base_seed;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(date_base_seed(date), 20250101);
/// ```
#[must_use]
#[expect(clippy::cast_sign_loss)]
pub fn date_base_seed(date: NaiveDate) -> u64 {
    let value = i64::from(date.year()) * 10_000 + i64::from(date.month() * 100 + date.day());
    // Dates before year 0 have no YYYYMMDD form; they wrap instead.
    value as u64
}

/// Derives the seed of round `round` from a batch base seed.
///
/// The multipliers keep neighbouring rounds of neighbouring dates apart.
///
/// # Examples
///
/// ```
/// use qiyaas_generator::round_seed;
///
/// assert_eq!(round_seed(20250101, 1), 20250101 * 97 + 191 + 7919);
/// assert_ne!(round_seed(20250101, 2), round_seed(20250102, 1));
/// ```
#[must_use]
pub fn round_seed(base: u64, round: u32) -> u64 {
    base.wrapping_mul(97)
        .wrapping_add(u64::from(round).wrapping_mul(191))
        .wrapping_add(7919)
}
