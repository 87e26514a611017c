//! Deterministic puzzle generation for Qiyaas.
//!
//! Every puzzle is selected by a [`PuzzleSelector`] from a seeded [`Pcg64`]
//! stream, so a seed and a vocabulary fully determine the result. On top of the
//! selector this crate provides:
//!
//! - [`RoundBatcher`]: several independent rounds for one date, seeded with
//!   [`round_seed`]
//! - [`DailyGenerator`]: the single daily puzzle, excluding the words in a
//!   [`UsageLedger`](qiyaas_core::UsageLedger)
//! - [`load_or_generate`]: an idempotent guard that keeps already stored
//!   puzzles unless regeneration is forced
//!
//! [`Pcg64`]: rand_pcg::Pcg64

pub use self::{
    batch::{GenerateError, RoundBatcher},
    daily::DailyGenerator,
    guard::{GuardError, Outcome, PuzzleArchive, Regenerate, load_or_generate},
    seed::{ParsePuzzleSeedError, PuzzleSeed, date_base_seed, round_seed},
    selector::{
        AttemptError, PuzzleSelector, SelectError, Selection, SelectionPolicy, SelectorConfig,
    },
};

mod batch;
mod daily;
pub mod guard;
mod seed;
mod selector;
