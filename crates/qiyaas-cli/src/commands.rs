use std::path::Path;

use qiyaas_core::{Bucketing, DailyPuzzle, VocabularyIndex};
use qiyaas_generator::{
    DailyGenerator, Outcome, PuzzleArchive as _, Regenerate, RoundBatcher, load_or_generate,
};
use qiyaas_store::{
    BatchArchive, DailyArchive, LedgerLock, load_ledger, load_vocabulary_source, save_ledger,
};

use crate::{
    args::{BatchArgs, Command, DailyArgs, GenerationArgs, ShowCommand},
    error::CliError,
    render,
};

pub(crate) fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Daily(args) => daily(&args),
        Command::Batch(args) => batch(&args),
        Command::Show(command) => show(command),
    }
}

fn daily(args: &DailyArgs) -> Result<(), CliError> {
    let puzzle = daily_puzzle(args)?;
    print!("{}", render::daily(&puzzle));
    Ok(())
}

fn daily_puzzle(args: &DailyArgs) -> Result<DailyPuzzle, CliError> {
    let date = args.generation.date();
    let length_spread = !args.no_length_spread;
    let vocabulary = load_vocabulary(&args.words, length_spread)?;
    let _lock = LedgerLock::acquire(&args.ledger)?;
    let mut ledger = load_ledger(&args.ledger)?;
    let mut archive = DailyArchive::new(&args.archive_dir);

    let generator = DailyGenerator::new(&vocabulary, args.generation.selector_config(length_spread));
    let outcome = load_or_generate(&mut archive, date, regenerate(&args.generation), || {
        generator.generate(date, &ledger)
    })
    .map_err(CliError::Daily)?;

    // A stored puzzle may come from a run that stopped before saving the ledger.
    let before = ledger.len();
    ledger.extend(outcome.record().words().cloned());
    if ledger.len() != before {
        if !outcome.is_generated() {
            log::info!("recording words of the stored puzzle for {date}");
        }
        save_ledger(&args.ledger, &ledger)?;
    }
    Ok(outcome.into_record())
}

fn batch(args: &BatchArgs) -> Result<(), CliError> {
    let date = args.generation.date();
    let vocabulary = load_vocabulary(&args.words, args.length_spread)?;
    let mut archive = BatchArchive::new(&args.archive);

    let batcher = RoundBatcher::new(&vocabulary, args.generation.selector_config(args.length_spread));
    let outcome = load_or_generate(&mut archive, date, regenerate(&args.generation), || {
        batcher.generate_batch(date, args.rounds)
    })
    .map_err(CliError::Batch)?;

    if let Outcome::Stored(stored) = &outcome {
        let stored_rounds = stored.rounds.len();
        if u32::try_from(stored_rounds).ok() != Some(args.rounds) {
            log::warn!("kept {stored_rounds} stored round(s) for {date}; pass --force to regenerate");
        }
    }
    print!("{}", render::batch(outcome.record()));
    Ok(())
}

fn show(command: ShowCommand) -> Result<(), CliError> {
    match command {
        ShowCommand::Daily {
            archive_dir,
            date,
            json,
        } => {
            let archive = DailyArchive::new(archive_dir);
            let puzzle = match date {
                Some(date) => archive.load(date)?.ok_or(CliError::NotFound(date))?,
                None => archive.current()?.ok_or(CliError::NoCurrent)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&puzzle)?);
            } else {
                print!("{}", render::daily(&puzzle));
            }
        }
        ShowCommand::Batch {
            archive,
            date,
            json,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let batch = BatchArchive::new(archive)
                .load(date)?
                .ok_or(CliError::NotFound(date))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            } else {
                print!("{}", render::batch(&batch));
            }
        }
    }
    Ok(())
}

fn load_vocabulary(path: &Path, length_spread: bool) -> Result<VocabularyIndex, CliError> {
    let bucketing = if length_spread {
        Bucketing::ByLength
    } else {
        Bucketing::Flat
    };
    let source = load_vocabulary_source(path)?;
    let vocabulary = VocabularyIndex::new(&source, bucketing)?;
    log::info!("loaded {} word(s) from {}", vocabulary.len(), path.display());
    Ok(vocabulary)
}

fn regenerate(args: &GenerationArgs) -> Regenerate {
    if args.force {
        Regenerate::Force
    } else {
        Regenerate::IfMissing
    }
}
