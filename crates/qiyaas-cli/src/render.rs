use qiyaas_core::{Clue, DailyPuzzle, PuzzleBatch};

pub(crate) fn daily(puzzle: &DailyPuzzle) -> String {
    let mut out = format!("Daily puzzle {}\n", puzzle.date);
    for clue in &puzzle.clues {
        push_clue(&mut out, clue);
    }
    out
}

pub(crate) fn batch(batch: &PuzzleBatch) -> String {
    let mut out = format!("Rounds for {}\n", batch.date);
    for (round, puzzle) in &batch.rounds {
        let numbers = puzzle.numbers().map(|n| n.to_string());
        out.push_str(&format!("Round {round}: numbers {}\n", numbers.join(", ")));
        for clue in puzzle.clues() {
            push_clue(&mut out, clue);
        }
    }
    out
}

fn push_clue(out: &mut String, clue: &Clue) {
    out.push_str(&clue_line(clue));
    out.push('\n');
}

fn clue_line(clue: &Clue) -> String {
    format!(
        "  {:<9} {:<9} {:<13} {}",
        clue.pos.to_string(),
        clue.word.as_str(),
        clue.rule.name(),
        clue.number
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use qiyaas_core::{ClueNumber, NumberingRule, PartOfSpeech, Puzzle, Word};

    use super::*;

    fn clues() -> [Clue; 3] {
        let clue = |pos, word, rule, number| Clue {
            pos,
            word: Word::new(word).unwrap(),
            rule,
            number: ClueNumber::new(number).unwrap(),
        };
        [
            clue(PartOfSpeech::Verb, "EAT", NumberingRule::LetterRule, 8),
            clue(PartOfSpeech::Noun, "APPLE", NumberingRule::AlphabetRule, 1),
            clue(PartOfSpeech::Adjective, "ODD", NumberingRule::LengthRule, 3),
        ]
    }

    #[test]
    fn test_daily_keeps_display_order() {
        let puzzle = DailyPuzzle {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            clues: clues(),
        };
        let text = daily(&puzzle);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Daily puzzle 2025-01-01");
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            ["VERB", "EAT", "letter_rule", "8"]
        );
        assert!(lines[2].contains("APPLE"));
        assert!(lines[3].contains("ODD"));
    }

    #[test]
    fn test_clue_line_columns() {
        let [verb, noun, _] = clues();
        assert_eq!(clue_line(&verb), "  VERB      EAT       letter_rule   8");
        assert_eq!(clue_line(&noun), "  NOUN      APPLE     alphabet_rule 1");
    }

    #[test]
    fn test_batch_lists_numbers_in_record_order() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let record = PuzzleBatch {
            date,
            rounds: BTreeMap::from([(1, Puzzle::new(clues()).unwrap())]),
        };
        let text = batch(&record);
        assert!(text.contains("Round 1: numbers 1, 8, 3\n"));
        assert!(text.lines().nth(2).unwrap().contains("APPLE"));
    }
}
