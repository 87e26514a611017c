use chrono::NaiveDate;
use qiyaas_core::{DailyPuzzle, UsageLedger, VocabularyIndex};

use crate::{PuzzleSeed, PuzzleSelector, SelectError, SelectorConfig, date_base_seed};

/// Generates the single puzzle of a day.
///
/// The date's [`date_base_seed`] seeds the selection and every word in the
/// usage ledger is excluded, so the daily puzzle never repeats a word spent on
/// an earlier day. Clues keep their pairing order, which is a seeded random
/// permutation of the parts of speech.
///
/// The generator does not record the words it uses; the caller adds them to the
/// ledger once the puzzle is stored.
#[derive(Debug, Clone)]
pub struct DailyGenerator<'a> {
    selector: PuzzleSelector<'a>,
}

impl<'a> DailyGenerator<'a> {
    /// Creates a generator drawing from `vocabulary`.
    ///
    /// Use [`SelectorConfig::daily`] for the standard daily configuration.
    #[must_use]
    pub fn new(vocabulary: &'a VocabularyIndex, config: SelectorConfig) -> Self {
        Self {
            selector: PuzzleSelector::new(vocabulary, config),
        }
    }

    /// Generates the puzzle for `date`, avoiding the words in `ledger`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError`] if no puzzle can be selected from the unused
    /// words.
    pub fn generate(
        &self,
        date: NaiveDate,
        ledger: &UsageLedger,
    ) -> Result<DailyPuzzle, SelectError> {
        let seed = PuzzleSeed::from_u64(date_base_seed(date));
        let selection = self.selector.select(seed, Some(ledger))?;
        log::info!(
            "daily puzzle for {date} selected in {} attempt(s), {} word(s) excluded",
            selection.attempts,
            ledger.len()
        );
        Ok(DailyPuzzle {
            date,
            clues: selection.ordered_clues(),
        })
    }
}
