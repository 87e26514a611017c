use chrono::NaiveDate;
use qiyaas_core::VocabularyError;
use qiyaas_generator::{GenerateError, GuardError, SelectError};
use qiyaas_store::StoreError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum CliError {
    #[display("{_0}")]
    Store(StoreError),
    #[display("malformed vocabulary source: {_0}")]
    Vocabulary(VocabularyError),
    #[display("daily puzzle: {_0}")]
    Daily(GuardError<StoreError, SelectError>),
    #[display("round batch: {_0}")]
    Batch(GuardError<StoreError, GenerateError>),
    #[display("no puzzle stored for {_0}")]
    #[from(ignore)]
    NotFound(#[error(not(source))] NaiveDate),
    #[display("no current puzzle stored")]
    NoCurrent,
    #[display("failed to encode JSON output: {_0}")]
    Json(serde_json::Error),
}
