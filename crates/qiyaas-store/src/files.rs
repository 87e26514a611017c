use std::path::Path;

use qiyaas_core::{UsageLedger, VocabularySource};

use crate::{StoreError, read_json, read_json_opt, write_json_atomic};

/// Loads a classified vocabulary source (`{"noun": [...], "verb": [...], "adjective": [...]}`).
///
/// The words are not validated here; build a
/// [`VocabularyIndex`](qiyaas_core::VocabularyIndex) from the result.
///
/// # Errors
///
/// Returns [`StoreError`] if the file is missing or is not an object of word lists.
pub fn load_vocabulary_source(path: &Path) -> Result<VocabularySource, StoreError> {
    let source: VocabularySource = read_json(path)?;
    log::debug!(
        "loaded {} word list(s) from {}",
        source.len(),
        path.display()
    );
    Ok(source)
}

/// Loads the usage ledger, or an empty one if the file does not exist yet.
///
/// # Errors
///
/// Returns [`StoreError`] if the file exists but cannot be read or parsed.
pub fn load_ledger(path: &Path) -> Result<UsageLedger, StoreError> {
    let ledger = read_json_opt(path)?.unwrap_or_else(|| {
        log::info!("no usage ledger at {}, starting empty", path.display());
        UsageLedger::new()
    });
    Ok(ledger)
}

/// Saves the usage ledger atomically.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be written.
pub fn save_ledger(path: &Path, ledger: &UsageLedger) -> Result<(), StoreError> {
    write_json_atomic(path, ledger)?;
    log::info!("saved {} used word(s) to {}", ledger.len(), path.display());
    Ok(())
}
