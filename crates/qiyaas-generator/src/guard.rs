//! Idempotent generation for dated puzzle records.
//!
//! Running the generator twice for the same date must not change what players
//! already saw. [`load_or_generate`] reads the stored record first and only
//! invokes the generator when nothing is stored or regeneration is forced.

use std::{
    collections::BTreeMap,
    convert::Infallible,
    error::Error,
    fmt::{self, Display},
};

use chrono::NaiveDate;

/// Storage for records keyed by date.
pub trait PuzzleArchive {
    /// The stored record.
    type Record;
    /// Errors raised by the storage backend.
    type Error;

    /// Returns the record stored for `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, date: NaiveDate) -> Result<Option<Self::Record>, Self::Error>;

    /// Stores `record` for `date`, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn store(&mut self, date: NaiveDate, record: &Self::Record) -> Result<(), Self::Error>;
}

impl<T> PuzzleArchive for BTreeMap<NaiveDate, T>
where
    T: Clone,
{
    type Record = T;
    type Error = Infallible;

    fn load(&self, date: NaiveDate) -> Result<Option<T>, Infallible> {
        Ok(self.get(&date).cloned())
    }

    fn store(&mut self, date: NaiveDate, record: &T) -> Result<(), Infallible> {
        self.insert(date, record.clone());
        Ok(())
    }
}

/// Whether an existing record may be replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Regenerate {
    /// Keep the stored record when there is one.
    #[default]
    IfMissing,
    /// Always generate and overwrite.
    Force,
}

/// The record returned by [`load_or_generate`] and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The record was already stored; the generator did not run.
    Stored(T),
    /// The record was freshly generated and stored.
    Generated(T),
}

impl<T> Outcome<T> {
    /// Returns `true` if the generator ran.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    /// Returns the record.
    #[must_use]
    pub fn record(&self) -> &T {
        match self {
            Self::Stored(record) | Self::Generated(record) => record,
        }
    }

    /// Consumes the outcome and returns the record.
    #[must_use]
    pub fn into_record(self) -> T {
        match self {
            Self::Stored(record) | Self::Generated(record) => record,
        }
    }
}

/// Errors returned by [`load_or_generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError<A, G> {
    /// The archive failed to load or store.
    Archive(A),
    /// The generator failed; nothing was stored.
    Generate(G),
}

impl<A, G> Display for GuardError<A, G>
where
    A: Display,
    G: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Archive(err) => write!(f, "puzzle archive error: {err}"),
            Self::Generate(err) => write!(f, "puzzle generation failed: {err}"),
        }
    }
}

impl<A, G> Error for GuardError<A, G>
where
    A: Error + 'static,
    G: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Archive(err) => Some(err),
            Self::Generate(err) => Some(err),
        }
    }
}

/// Returns the record stored for `date`, generating and storing one if needed.
///
/// With [`Regenerate::IfMissing`], a stored record is returned unchanged and
/// `generate` is not called. With [`Regenerate::Force`], or when nothing is
/// stored, `generate` runs and its record is stored before being returned. A
/// failed generation stores nothing.
///
/// # Errors
///
/// Returns [`GuardError::Archive`] if loading or storing fails, and
/// [`GuardError::Generate`] if `generate` fails.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use chrono::NaiveDate;
/// use qiyaas_generator::{Outcome, Regenerate, load_or_generate};
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let mut archive = BTreeMap::new();
///
/// let first = load_or_generate(&mut archive, date, Regenerate::IfMissing, || {
///     Ok::<_, std::convert::Infallible>("first")
/// });
/// assert_eq!(first, Ok(Outcome::Generated("first")));
///
/// let second = load_or_generate(&mut archive, date, Regenerate::IfMissing, || {
///     Ok::<_, std::convert::Infallible>("second")
/// });
/// assert_eq!(second, Ok(Outcome::Stored("first")));
/// ```
pub fn load_or_generate<S, F, E>(
    archive: &mut S,
    date: NaiveDate,
    regenerate: Regenerate,
    generate: F,
) -> Result<Outcome<S::Record>, GuardError<S::Error, E>>
where
    S: PuzzleArchive + ?Sized,
    F: FnOnce() -> Result<S::Record, E>,
{
    if regenerate == Regenerate::IfMissing {
        if let Some(record) = archive.load(date).map_err(GuardError::Archive)? {
            log::info!("puzzle for {date} already exists, keeping it");
            return Ok(Outcome::Stored(record));
        }
    } else {
        log::info!("regenerating puzzle for {date}");
    }

    let record = generate().map_err(GuardError::Generate)?;
    archive.store(date, &record).map_err(GuardError::Archive)?;
    Ok(Outcome::Generated(record))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
    #[display("generator failed")]
    struct GenFailed;

    #[test]
    fn test_existing_record_is_returned_without_generating() {
        let calls = Cell::new(0);
        let generate = |value: u32| {
            let calls = &calls;
            move || {
                calls.set(calls.get() + 1);
                Ok::<_, GenFailed>(value)
            }
        };

        let mut archive = BTreeMap::new();
        let first = load_or_generate(&mut archive, date(1), Regenerate::IfMissing, generate(1));
        assert_eq!(first, Ok(Outcome::Generated(1)));
        for _ in 0..3 {
            let again =
                load_or_generate(&mut archive, date(1), Regenerate::IfMissing, generate(2));
            assert_eq!(again, Ok(Outcome::Stored(1)));
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(archive[&date(1)], 1);
    }

    #[test]
    fn test_force_overwrites() {
        let mut archive = BTreeMap::from([(date(2), 10)]);
        let outcome = load_or_generate(&mut archive, date(2), Regenerate::Force, || {
            Ok::<_, GenFailed>(20)
        })
        .unwrap();
        assert!(outcome.is_generated());
        assert_eq!(outcome.into_record(), 20);
        assert_eq!(archive[&date(2)], 20);
    }

    #[test]
    fn test_dates_are_independent() {
        let mut archive = BTreeMap::from([(date(3), "old")]);
        let outcome = load_or_generate(&mut archive, date(4), Regenerate::IfMissing, || {
            Ok::<_, GenFailed>("new")
        })
        .unwrap();
        assert_eq!(outcome.record(), &"new");
        assert_eq!(archive.len(), 2);
        assert_eq!(archive[&date(3)], "old");
    }

    #[test]
    fn test_failed_generation_stores_nothing() {
        let mut archive: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        let err = load_or_generate(&mut archive, date(5), Regenerate::Force, || Err(GenFailed))
            .unwrap_err();
        assert_eq!(err, GuardError::Generate(GenFailed));
        assert_eq!(err.to_string(), "puzzle generation failed: generator failed");
        assert!(archive.is_empty());
    }
}
