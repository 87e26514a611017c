//! JSON persistence for Qiyaas puzzle data.
//!
//! Vocabulary sources and usage ledgers are plain JSON files. Generated
//! puzzles live in a [`BatchArchive`] (one file for all dates) or a
//! [`DailyArchive`] (one file per date). Both archives implement
//! [`PuzzleArchive`](qiyaas_generator::PuzzleArchive), so they plug into
//! [`load_or_generate`](qiyaas_generator::load_or_generate).
//!
//! Commands that update the ledger hold a [`LedgerLock`] from load to save.
//!
//! Every write goes through [`write_json_atomic`], which replaces the target
//! file in a single rename.

pub use self::{
    archive::{BatchArchive, DailyArchive},
    error::StoreError,
    files::{load_ledger, load_vocabulary_source, save_ledger},
    json::{read_json, read_json_opt, write_json_atomic},
    lock::LedgerLock,
};

pub mod archive;
mod error;
mod files;
mod json;
mod lock;
