use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::StoreError;

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be opened and
/// [`StoreError::Json`] if its content does not match `T`.
pub fn read_json<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::json(path, e))
}

/// Like [`read_json`], but returns `None` when the file does not exist.
///
/// # Errors
///
/// Returns the same errors as [`read_json`] for any other failure.
pub fn read_json_opt<T>(path: &Path) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    match File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|e| StoreError::json(path, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Writes `value` as pretty-printed JSON, replacing `path` atomically.
///
/// The data goes to a temporary file in the same directory, which is then
/// renamed over `path`, so readers never observe a partial file. Missing parent
/// directories are created.
///
/// # Errors
///
/// Returns [`StoreError`] if the directory, the temporary file or the rename
/// fails, or if `value` cannot be serialized.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    let mut writer = BufWriter::new(&temp);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| StoreError::json(path, e))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| StoreError::io(temp.path(), e))?;
    drop(writer);

    temp.persist(path).map_err(|e| StoreError::Persist {
        path: path.to_owned(),
        source: e.error,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
