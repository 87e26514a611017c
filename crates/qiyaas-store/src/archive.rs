//! File-backed [`PuzzleArchive`] implementations.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use qiyaas_core::{DailyPuzzle, Puzzle, PuzzleBatch};
use qiyaas_generator::PuzzleArchive;

use crate::{StoreError, read_json_opt, write_json_atomic};

type BatchFile = BTreeMap<NaiveDate, BTreeMap<u32, Puzzle>>;

const CURRENT_FILE: &str = "current_puzzle.json";

/// Round batches of every date, kept in a single JSON file keyed by ISO date.
///
/// ```json
/// {
///   "2025-01-01": {
///     "1": {
///       "noun": { "word": "APPLE", "rule": "alphabet_rule" },
///       "verb": { "word": "EAT", "rule": "letter_rule" },
///       "adjective": { "word": "ODD", "rule": "length_rule" },
///       "numbers": [1, 8, 3]
///     }
///   }
/// }
/// ```
///
/// A missing file is an empty archive. Storing a batch rewrites the whole
/// file atomically and leaves other dates untouched.
#[derive(Debug, Clone)]
pub struct BatchArchive {
    path: PathBuf,
}

impl BatchArchive {
    /// Opens the archive at `path`; the file is created on the first store.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the archive file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the dates that have a stored batch, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, StoreError> {
        Ok(self.read()?.into_keys().collect())
    }

    fn read(&self) -> Result<BatchFile, StoreError> {
        Ok(read_json_opt(&self.path)?.unwrap_or_default())
    }
}

impl PuzzleArchive for BatchArchive {
    type Record = PuzzleBatch;
    type Error = StoreError;

    fn load(&self, date: NaiveDate) -> Result<Option<PuzzleBatch>, StoreError> {
        let mut file = self.read()?;
        Ok(file
            .remove(&date)
            .map(|rounds| PuzzleBatch { date, rounds }))
    }

    fn store(&mut self, date: NaiveDate, record: &PuzzleBatch) -> Result<(), StoreError> {
        let mut file = self.read()?;
        file.insert(date, record.rounds.clone());
        write_json_atomic(&self.path, &file)?;
        log::info!(
            "stored {} round(s) for {date} in {}",
            record.rounds.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Daily puzzles, one `puzzle_YYYY-MM-DD.json` file per date, plus
/// `current_puzzle.json` holding the most recently stored one.
#[derive(Debug, Clone)]
pub struct DailyArchive {
    dir: PathBuf,
}

impl DailyArchive {
    /// Opens the archive in `dir`; the directory is created on the first store.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the archive directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file holding the puzzle of `date`.
    #[must_use]
    pub fn puzzle_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("puzzle_{}.json", date.format("%Y-%m-%d")))
    }

    /// Returns the file holding the current puzzle.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    /// Loads the most recently stored puzzle, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read.
    pub fn current(&self) -> Result<Option<DailyPuzzle>, StoreError> {
        read_json_opt(&self.current_path())
    }
}

impl PuzzleArchive for DailyArchive {
    type Record = DailyPuzzle;
    type Error = StoreError;

    fn load(&self, date: NaiveDate) -> Result<Option<DailyPuzzle>, StoreError> {
        read_json_opt(&self.puzzle_path(date))
    }

    fn store(&mut self, date: NaiveDate, record: &DailyPuzzle) -> Result<(), StoreError> {
        let path = self.puzzle_path(date);
        // The dated file is what `load` sees, so it is written last.
        write_json_atomic(&self.current_path(), record)?;
        write_json_atomic(&path, record)?;
        log::info!("stored daily puzzle for {date} in {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use qiyaas_core::{Clue, ClueNumber, NumberingRule, PartOfSpeech, Word};
    use qiyaas_generator::{Outcome, Regenerate, load_or_generate};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn clue(pos: PartOfSpeech, word: &str, rule: NumberingRule, number: u8) -> Clue {
        Clue {
            pos,
            word: Word::new(word).unwrap(),
            rule,
            number: ClueNumber::new(number).unwrap(),
        }
    }

    fn sample_clues() -> [Clue; 3] {
        [
            clue(PartOfSpeech::Verb, "EAT", NumberingRule::LetterRule, 8),
            clue(PartOfSpeech::Adjective, "ODD", NumberingRule::LengthRule, 3),
            clue(PartOfSpeech::Noun, "APPLE", NumberingRule::AlphabetRule, 1),
        ]
    }

    fn sample_batch(date: NaiveDate) -> PuzzleBatch {
        let puzzle = Puzzle::new(sample_clues()).unwrap();
        PuzzleBatch {
            date,
            rounds: BTreeMap::from([(1, puzzle)]),
        }
    }

    #[test]
    fn test_batch_archive_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = BatchArchive::new(dir.path().join("puzzles.json"));
        assert_eq!(archive.load(date(1)).unwrap(), None);

        archive.store(date(1), &sample_batch(date(1))).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(archive.path()).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "2025-01-01": {
                    "1": {
                        "noun": { "word": "APPLE", "rule": "alphabet_rule" },
                        "verb": { "word": "EAT", "rule": "letter_rule" },
                        "adjective": { "word": "ODD", "rule": "length_rule" },
                        "numbers": [1, 8, 3]
                    }
                }
            })
        );
        assert_eq!(archive.load(date(1)).unwrap(), Some(sample_batch(date(1))));
    }

    #[test]
    fn test_batch_archive_keeps_other_dates() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = BatchArchive::new(dir.path().join("puzzles.json"));
        archive.store(date(2), &sample_batch(date(2))).unwrap();
        archive.store(date(1), &sample_batch(date(1))).unwrap();
        assert_eq!(archive.dates().unwrap(), [date(1), date(2)]);
    }

    #[test]
    fn test_daily_archive_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = DailyArchive::new(dir.path().join("daily"));
        let daily = DailyPuzzle {
            date: date(3),
            clues: sample_clues(),
        };
        archive.store(date(3), &daily).unwrap();

        assert!(dir.path().join("daily/puzzle_2025-01-03.json").is_file());
        assert_eq!(archive.load(date(3)).unwrap(), Some(daily.clone()));
        assert_eq!(archive.current().unwrap(), Some(daily));
        assert_eq!(archive.load(date(4)).unwrap(), None);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(archive.current_path()).unwrap()).unwrap();
        assert_eq!(json["date"], "2025-01-03");
        assert_eq!(json["clues"][0]["type"], "VERB");
        assert_eq!(json["clues"][0]["number"], 8);
    }

    #[test]
    fn test_daily_archive_failed_store_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = DailyArchive::new(dir.path());
        let daily = DailyPuzzle {
            date: date(5),
            clues: sample_clues(),
        };
        let blocker = archive.puzzle_path(date(5));
        fs::create_dir_all(blocker.join("occupied")).unwrap();

        assert!(archive.store(date(5), &daily).is_err());
        assert!(!matches!(archive.load(date(5)), Ok(Some(_))));

        fs::remove_dir_all(&blocker).unwrap();
        assert_eq!(archive.load(date(5)).unwrap(), None);
        archive.store(date(5), &daily).unwrap();
        assert_eq!(archive.load(date(5)).unwrap(), Some(daily.clone()));
        assert_eq!(archive.current().unwrap(), Some(daily));
    }

    #[test]
    fn test_daily_archive_rejects_tampered_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = DailyArchive::new(dir.path());
        let daily = DailyPuzzle {
            date: date(6),
            clues: sample_clues(),
        };
        archive.store(date(6), &daily).unwrap();

        let path = archive.puzzle_path(date(6));
        let mut json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        json["clues"][0]["number"] = 9.into();
        fs::write(&path, json.to_string()).unwrap();

        assert!(matches!(
            archive.load(date(6)),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn test_guard_keeps_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = BatchArchive::new(dir.path().join("puzzles.json"));
        archive.store(date(1), &sample_batch(date(1))).unwrap();
        let before = fs::read(archive.path()).unwrap();

        let outcome = load_or_generate(&mut archive, date(1), Regenerate::IfMissing, || {
            Err::<PuzzleBatch, _>("generator must not run")
        })
        .unwrap();
        assert!(matches!(outcome, Outcome::Stored(_)));
        assert_eq!(fs::read(archive.path()).unwrap(), before);
    }
}
