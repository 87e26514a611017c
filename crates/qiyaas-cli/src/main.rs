//! Command-line front end for the Qiyaas puzzle generator.
//!
//! # Usage
//!
//! Generate (or reuse) today's daily puzzle and record its words:
//!
//! ```sh
//! qiyaas daily --words words.json --ledger used_words.json --archive-dir puzzles
//! ```
//!
//! Generate five rounds for a fixed date:
//!
//! ```sh
//! qiyaas batch --words words.json --archive puzzles.json --date 2025-01-01 --rounds 5
//! ```
//!
//! Print stored puzzles:
//!
//! ```sh
//! qiyaas show daily --archive-dir puzzles
//! qiyaas show batch --archive puzzles.json --date 2025-01-01
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to see what the generator does.

use std::process;

use clap::Parser as _;

use crate::args::Cli;

mod args;
mod commands;
mod error;
mod render;

fn main() {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = commands::run(cli.command) {
        log::debug!("{err:?}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}
