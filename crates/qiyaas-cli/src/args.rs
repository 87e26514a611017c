use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use qiyaas_generator::{SelectionPolicy, SelectorConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Generate the daily puzzle, excluding previously used words.
    Daily(DailyArgs),
    /// Generate a batch of independent rounds for one date.
    Batch(BatchArgs),
    /// Print a stored puzzle.
    #[command(subcommand)]
    Show(ShowCommand),
}

#[derive(Debug, Args)]
pub(crate) struct DailyArgs {
    /// Classified vocabulary source (JSON).
    #[arg(long, value_name = "FILE")]
    pub(crate) words: PathBuf,

    /// Usage ledger of spent words (JSON). Created if missing.
    #[arg(long, value_name = "FILE", default_value = "used_words.json")]
    pub(crate) ledger: PathBuf,

    /// Directory holding `puzzle_YYYY-MM-DD.json` and `current_puzzle.json`.
    #[arg(long, value_name = "DIR", default_value = "puzzles")]
    pub(crate) archive_dir: PathBuf,

    /// Draw words of every length instead of one short, one medium and one long.
    #[arg(long)]
    pub(crate) no_length_spread: bool,

    #[command(flatten)]
    pub(crate) generation: GenerationArgs,
}

#[derive(Debug, Args)]
pub(crate) struct BatchArgs {
    /// Classified vocabulary source (JSON).
    #[arg(long, value_name = "FILE")]
    pub(crate) words: PathBuf,

    /// Batch archive file, keyed by date.
    #[arg(long, value_name = "FILE", default_value = "puzzles.json")]
    pub(crate) archive: PathBuf,

    /// Number of rounds to generate.
    #[arg(short, long, value_name = "COUNT", default_value_t = 5)]
    pub(crate) rounds: u32,

    /// Assign one short, one medium and one long word per round.
    #[arg(long)]
    pub(crate) length_spread: bool,

    #[command(flatten)]
    pub(crate) generation: GenerationArgs,
}

#[derive(Debug, Args)]
pub(crate) struct GenerationArgs {
    /// Puzzle date (YYYY-MM-DD). Defaults to today in local time.
    #[arg(long, value_name = "DATE")]
    pub(crate) date: Option<NaiveDate>,

    /// Replace a puzzle already stored for the date.
    #[arg(long)]
    pub(crate) force: bool,

    /// Pairings tried per puzzle before giving up.
    #[arg(long, value_name = "COUNT", default_value_t = SelectorConfig::DEFAULT_MAX_ATTEMPTS)]
    pub(crate) max_attempts: usize,

    /// Word draws per clue before an attempt fails.
    #[arg(long, value_name = "COUNT", default_value_t = SelectorConfig::DEFAULT_MAX_DRAWS)]
    pub(crate) max_draws: usize,

    /// Use the single-pass reroll policy with this probability instead of
    /// strict selection. Clue numbers may then repeat.
    #[arg(long, value_name = "P", value_parser = parse_probability)]
    pub(crate) reroll_probability: Option<f64>,
}

impl GenerationArgs {
    pub(crate) fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub(crate) fn selector_config(&self, length_spread: bool) -> SelectorConfig {
        let policy = match self.reroll_probability {
            Some(probability) => SelectionPolicy::Reroll { probability },
            None => SelectionPolicy::StrictDistinct,
        };
        SelectorConfig {
            max_attempts: self.max_attempts,
            max_draws: self.max_draws,
            policy,
            length_spread,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum ShowCommand {
    /// Print a daily puzzle, or the current one when no date is given.
    Daily {
        /// Daily archive directory.
        #[arg(long, value_name = "DIR", default_value = "puzzles")]
        archive_dir: PathBuf,
        /// Puzzle date (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// Print the stored JSON record.
        #[arg(long)]
        json: bool,
    },
    /// Print the rounds stored for a date.
    Batch {
        /// Batch archive file.
        #[arg(long, value_name = "FILE", default_value = "puzzles.json")]
        archive: PathBuf,
        /// Batch date (YYYY-MM-DD). Defaults to today in local time.
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// Print the stored JSON record.
        #[arg(long)]
        json: bool,
    },
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not in 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_daily_defaults() {
        let cli = Cli::try_parse_from(["qiyaas", "daily", "--words", "words.json"]).unwrap();
        let Command::Daily(args) = cli.command else {
            panic!("expected daily command");
        };
        assert_eq!(args.ledger, PathBuf::from("used_words.json"));
        let config = args.generation.selector_config(!args.no_length_spread);
        assert_eq!(config, SelectorConfig::daily());
    }

    #[test]
    fn test_batch_options() {
        let cli = Cli::try_parse_from([
            "qiyaas",
            "batch",
            "--words",
            "words.json",
            "--rounds",
            "3",
            "--date",
            "2025-01-01",
            "--reroll-probability",
            "0.25",
        ])
        .unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch command");
        };
        assert_eq!(args.rounds, 3);
        assert_eq!(
            args.generation.date(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            args.generation.selector_config(false).policy,
            SelectionPolicy::Reroll { probability: 0.25 }
        );
    }

    #[test]
    fn test_probability_out_of_range() {
        assert!(
            Cli::try_parse_from([
                "qiyaas",
                "batch",
                "--words",
                "w.json",
                "--reroll-probability",
                "1.5",
            ])
            .is_err()
        );
    }
}
