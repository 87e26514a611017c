use std::collections::BTreeMap;

use chrono::NaiveDate;
use qiyaas_core::{PuzzleBatch, VocabularyIndex};

use crate::{PuzzleSeed, PuzzleSelector, SelectError, SelectorConfig, date_base_seed, round_seed};

/// Errors returned by [`RoundBatcher::generate_batch`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    /// A batch needs at least one round.
    #[display("round count must be at least 1")]
    NoRounds,
    /// A round could not be generated; the batch is discarded.
    #[display("round {round} failed: {source}")]
    Round {
        /// The 1-based index of the failed round.
        round: u32,
        /// Why selection failed.
        source: SelectError,
    },
}

/// Generates a dated batch of independent puzzle rounds.
///
/// Round `i` (starting at 1) is selected with the seed
/// [`round_seed`]`(`[`date_base_seed`]`(date), i)`, without a usage ledger, so
/// a round never depends on the rounds before it and words may repeat across
/// rounds. The first failing round aborts the whole batch.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use qiyaas_core::{Bucketing, VocabularyIndex, VocabularySource};
/// use qiyaas_generator::{RoundBatcher, SelectorConfig};
///
/// let source: VocabularySource = [
///     ("noun", vec!["apple", "train", "bird", "ocean"]),
///     ("verb", vec!["eat", "find", "sing", "dance"]),
///     ("adjective", vec!["odd", "tall", "brave", "eager"]),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_owned(), v.into_iter().map(str::to_owned).collect()))
/// .collect();
/// let vocabulary = VocabularyIndex::new(&source, Bucketing::Flat)?;
///
/// let batcher = RoundBatcher::new(&vocabulary, SelectorConfig::default());
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let batch = batcher.generate_batch(date, 3)?;
/// assert_eq!(batch.rounds.len(), 3);
/// assert_eq!(batch, batcher.generate_batch(date, 3)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoundBatcher<'a> {
    selector: PuzzleSelector<'a>,
}

impl<'a> RoundBatcher<'a> {
    /// Creates a batcher drawing from `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: &'a VocabularyIndex, config: SelectorConfig) -> Self {
        Self {
            selector: PuzzleSelector::new(vocabulary, config),
        }
    }

    /// Returns the seed used for `round` of `date`.
    #[must_use]
    pub fn seed_for(date: NaiveDate, round: u32) -> PuzzleSeed {
        PuzzleSeed::from_u64(round_seed(date_base_seed(date), round))
    }

    /// Generates `round_count` rounds for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::NoRounds`] if `round_count` is 0, or
    /// [`GenerateError::Round`] for the first round that cannot be selected.
    pub fn generate_batch(
        &self,
        date: NaiveDate,
        round_count: u32,
    ) -> Result<PuzzleBatch, GenerateError> {
        if round_count == 0 {
            return Err(GenerateError::NoRounds);
        }

        let mut rounds = BTreeMap::new();
        for round in 1..=round_count {
            let selection = self
                .selector
                .select(Self::seed_for(date, round), None)
                .map_err(|source| GenerateError::Round { round, source })?;
            log::debug!(
                "{date} round {round}: {} attempt(s)",
                selection.attempts
            );
            rounds.insert(round, selection.puzzle);
        }

        log::info!("generated {round_count} round(s) for {date}");
        Ok(PuzzleBatch { date, rounds })
    }
}

#[cfg(test)]
mod tests {
    use qiyaas_core::{Bucketing, NumberingRule, VocabularySource};

    use super::*;

    fn vocabulary(entries: &[(&str, &[&str])]) -> VocabularyIndex {
        let source: VocabularySource = entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.iter().map(|s| (*s).to_owned()).collect()))
            .collect();
        VocabularyIndex::new(&source, Bucketing::Flat).unwrap()
    }

    fn sample_vocabulary() -> VocabularyIndex {
        vocabulary(&[
            ("noun", &["APPLE", "TRAIN", "BIRD", "OCEAN", "FOREST", "HARBOR"]),
            ("verb", &["EAT", "FIND", "SING", "DANCE", "OPEN", "GATHER"]),
            ("adjective", &["ODD", "TALL", "BRAVE", "EAGER", "SILENT", "HUMBLE"]),
        ])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_batch_is_reproducible() {
        let vocabulary = sample_vocabulary();
        let batcher = RoundBatcher::new(&vocabulary, SelectorConfig::default());
        let first = batcher.generate_batch(date(2025, 1, 1), 5).unwrap();
        let second = batcher.generate_batch(date(2025, 1, 1), 5).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.rounds.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rounds_are_independent_of_round_count() {
        let vocabulary = sample_vocabulary();
        let batcher = RoundBatcher::new(&vocabulary, SelectorConfig::default());
        let short = batcher.generate_batch(date(2025, 3, 14), 2).unwrap();
        let long = batcher.generate_batch(date(2025, 3, 14), 6).unwrap();
        assert_eq!(short.rounds[&1], long.rounds[&1]);
        assert_eq!(short.rounds[&2], long.rounds[&2]);
    }

    #[test]
    fn test_every_round_is_valid() {
        let vocabulary = sample_vocabulary();
        let batcher = RoundBatcher::new(&vocabulary, SelectorConfig::default());
        let batch = batcher.generate_batch(date(2024, 2, 29), 8).unwrap();
        for puzzle in batch.rounds.values() {
            assert!(puzzle.has_distinct_numbers());
            let mut rules: Vec<_> = puzzle.clues().iter().map(|clue| clue.rule).collect();
            rules.sort();
            assert_eq!(rules, NumberingRule::ALL);
        }
    }

    #[test]
    fn test_zero_rounds() {
        let vocabulary = sample_vocabulary();
        let batcher = RoundBatcher::new(&vocabulary, SelectorConfig::default());
        assert_eq!(
            batcher.generate_batch(date(2025, 1, 1), 0),
            Err(GenerateError::NoRounds)
        );
    }

    #[test]
    fn test_failing_round_aborts_batch() {
        let vocabulary = vocabulary(&[("noun", &["ZOO"]), ("verb", &["RUN"]), ("adjective", &["WARM"])]);
        let batcher = RoundBatcher::new(&vocabulary, SelectorConfig::default());
        let err = batcher.generate_batch(date(2025, 1, 1), 3).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Round {
                round: 1,
                source: SelectError::AttemptsExhausted { .. }
            }
        ));
    }

    #[test]
    fn test_round_seeds_follow_date() {
        assert_eq!(
            RoundBatcher::seed_for(date(2025, 1, 1), 1),
            PuzzleSeed::from_u64(20_250_101 * 97 + 191 + 7919)
        );
        assert_ne!(
            RoundBatcher::seed_for(date(2025, 1, 1), 1),
            RoundBatcher::seed_for(date(2025, 1, 1), 2)
        );
    }
}
