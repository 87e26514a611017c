use qiyaas_core::{
    Clue, ClueNumber, ClueNumberSet, LengthCategory, NumberingRule, PartOfSpeech, Puzzle,
    PuzzleError, UsageLedger, VocabularyIndex, Word,
};
use rand::{
    distr::{Bernoulli, Distribution as _},
    seq::{IndexedRandom as _, SliceRandom as _},
};
use rand_pcg::Pcg64;

use crate::PuzzleSeed;

/// How a selector makes the three clue numbers distinct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Numbers are kept distinct while drawing; attempts that cannot finish
    /// are retried with a fresh pairing. Every returned puzzle has distinct
    /// numbers.
    StrictDistinct,
    /// A single pairing is drawn. If the numbers collide, the last clue's word
    /// is redrawn once with the given probability and the result is kept
    /// either way.
    ///
    /// This policy does **not** guarantee distinct numbers.
    Reroll {
        /// Chance of redrawing the last clue when numbers collide, in `0.0..=1.0`.
        probability: f64,
    },
}

/// Tunables for [`PuzzleSelector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    /// Number of pairings tried before giving up. Values below 1 are treated as 1.
    pub max_attempts: usize,
    /// Word draws per clue before an attempt fails for lack of an unused number.
    pub max_draws: usize,
    /// Distinctness policy.
    pub policy: SelectionPolicy,
    /// Assign one short, one medium and one long word per puzzle.
    pub length_spread: bool,
}

impl SelectorConfig {
    /// Default number of attempts per puzzle.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 20;
    /// Default number of word draws per clue.
    pub const DEFAULT_MAX_DRAWS: usize = 10;

    /// The configuration used for the single daily puzzle: strict, with a
    /// short, a medium and a long word.
    #[must_use]
    pub fn daily() -> Self {
        Self {
            length_spread: true,
            ..Self::default()
        }
    }

    /// Returns `true` if the policy guarantees distinct clue numbers.
    #[must_use]
    pub fn strict_distinct(&self) -> bool {
        matches!(self.policy, SelectionPolicy::StrictDistinct)
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            max_draws: Self::DEFAULT_MAX_DRAWS,
            policy: SelectionPolicy::StrictDistinct,
            length_spread: false,
        }
    }
}

/// Why one selection attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AttemptError {
    /// No unused word of the part of speech (and length bucket) is eligible for the rule.
    #[display("no eligible {pos} words for {rule} (length bucket: {category:?})")]
    PoolExhausted {
        /// The part of speech being drawn.
        pos: PartOfSpeech,
        /// The rule paired with it.
        rule: NumberingRule,
        /// The length bucket, when length spread is enabled.
        category: Option<LengthCategory>,
    },
    /// Every draw produced a number already used in the puzzle.
    #[display("no {pos} word gave {rule} an unused number in {draws} draws")]
    NoDistinctNumber {
        /// The part of speech being drawn.
        pos: PartOfSpeech,
        /// The rule paired with it.
        rule: NumberingRule,
        /// Number of draws made.
        draws: usize,
    },
}

/// Errors returned by [`PuzzleSelector::select`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SelectError {
    /// The only attempt of the reroll policy failed.
    #[display("{_0}")]
    Attempt(AttemptError),
    /// No attempt of the strict policy succeeded.
    #[display("no puzzle found in {attempts} attempts, last failure: {source}")]
    #[from(ignore)]
    AttemptsExhausted {
        /// Attempts made.
        attempts: usize,
        /// Why the final attempt failed.
        source: AttemptError,
    },
    /// The drawn clues failed puzzle validation.
    #[display("selected clues do not form a puzzle: {_0}")]
    Invalid(PuzzleError),
}

/// A selected puzzle together with the order its clues were paired in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The puzzle.
    pub puzzle: Puzzle,
    /// Parts of speech in pairing order, which is a random permutation.
    pub order: [PartOfSpeech; 3],
    /// Attempts used, starting at 1.
    pub attempts: usize,
}

impl Selection {
    /// Returns the clues in pairing order.
    #[must_use]
    pub fn ordered_clues(&self) -> [Clue; 3] {
        self.order.map(|pos| self.puzzle.clue(pos).clone())
    }
}

/// Deterministic selector for one puzzle.
///
/// Each call to [`select`](Self::select) pairs the three parts of speech with
/// the three numbering rules at random, draws one word per pair and assigns
/// clue numbers. All randomness comes from a [`Pcg64`] seeded with the given
/// [`PuzzleSeed`], so equal seeds, vocabularies and exclusion sets give equal
/// puzzles. The selector never modifies the vocabulary or the ledger.
///
/// # Examples
///
/// ```
/// use qiyaas_core::{Bucketing, VocabularyIndex, VocabularySource};
/// use qiyaas_generator::{PuzzleSeed, PuzzleSelector, SelectorConfig};
///
/// let source: VocabularySource = [
///     ("noun", vec!["apple"]),
///     ("verb", vec!["eat"]),
///     ("adjective", vec!["odd"]),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_owned(), v.into_iter().map(str::to_owned).collect()))
/// .collect();
/// let vocabulary = VocabularyIndex::new(&source, Bucketing::Flat)?;
///
/// let config = SelectorConfig {
///     max_attempts: 200,
///     ..SelectorConfig::default()
/// };
/// let selector = PuzzleSelector::new(&vocabulary, config);
/// let selection = selector.select(PuzzleSeed::from_u64(20250101), None)?;
/// assert!(selection.puzzle.has_distinct_numbers());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleSelector<'a> {
    vocabulary: &'a VocabularyIndex,
    config: SelectorConfig,
}

struct Pairing {
    pos: PartOfSpeech,
    rule: NumberingRule,
    category: Option<LengthCategory>,
}

impl<'a> PuzzleSelector<'a> {
    /// Creates a selector over `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: &'a VocabularyIndex, config: SelectorConfig) -> Self {
        Self { vocabulary, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Returns the vocabulary words are drawn from.
    #[must_use]
    pub fn vocabulary(&self) -> &'a VocabularyIndex {
        self.vocabulary
    }

    /// Selects one puzzle.
    ///
    /// Words in `exclude` are never drawn.
    ///
    /// # Errors
    ///
    /// With [`SelectionPolicy::StrictDistinct`], returns
    /// [`SelectError::AttemptsExhausted`] when no attempt succeeds. With
    /// [`SelectionPolicy::Reroll`], returns [`SelectError::Attempt`] when a
    /// clue has no eligible word.
    pub fn select(
        &self,
        seed: PuzzleSeed,
        exclude: Option<&UsageLedger>,
    ) -> Result<Selection, SelectError> {
        let mut rng = seed.rng();
        match self.config.policy {
            SelectionPolicy::StrictDistinct => self.select_strict(&mut rng, exclude),
            SelectionPolicy::Reroll { probability } => {
                self.select_reroll(&mut rng, exclude, probability)
            }
        }
    }

    fn select_strict(
        &self,
        rng: &mut Pcg64,
        exclude: Option<&UsageLedger>,
    ) -> Result<Selection, SelectError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let pairings = self.pairings(rng);
            match self.attempt_strict(rng, &pairings, exclude) {
                Ok(clues) => {
                    log::debug!("puzzle selected on attempt {attempt}");
                    return finish(clues, attempt);
                }
                Err(err) if attempt >= max_attempts => {
                    return Err(SelectError::AttemptsExhausted {
                        attempts: attempt,
                        source: err,
                    });
                }
                Err(err) => log::debug!("attempt {attempt} failed: {err}"),
            }
            attempt += 1;
        }
    }

    fn attempt_strict(
        &self,
        rng: &mut Pcg64,
        pairings: &[Pairing; 3],
        exclude: Option<&UsageLedger>,
    ) -> Result<[Clue; 3], AttemptError> {
        let mut used = ClueNumberSet::EMPTY;
        let mut clues = Vec::with_capacity(3);
        for pairing in pairings {
            let pool = self.pool(pairing, exclude)?;
            let clue = self.draw_distinct(rng, pairing, &pool, used)?;
            used.insert(clue.number);
            clues.push(clue);
        }
        Ok(into_array(clues))
    }

    fn draw_distinct(
        &self,
        rng: &mut Pcg64,
        pairing: &Pairing,
        pool: &[&Word],
        used: ClueNumberSet,
    ) -> Result<Clue, AttemptError> {
        let draws = self.config.max_draws.max(1);
        for _ in 0..draws {
            let Some(&word) = pool.choose(rng) else {
                break;
            };
            let candidates = pairing
                .rule
                .apply(word)
                .unwrap_or_default()
                .difference(used);
            if let Some(number) = choose_number(rng, candidates) {
                return Ok(Clue {
                    pos: pairing.pos,
                    word: word.clone(),
                    rule: pairing.rule,
                    number,
                });
            }
        }
        Err(AttemptError::NoDistinctNumber {
            pos: pairing.pos,
            rule: pairing.rule,
            draws,
        })
    }

    fn select_reroll(
        &self,
        rng: &mut Pcg64,
        exclude: Option<&UsageLedger>,
        probability: f64,
    ) -> Result<Selection, SelectError> {
        let pairings = self.pairings(rng);
        let pools = [
            self.pool(&pairings[0], exclude)?,
            self.pool(&pairings[1], exclude)?,
            self.pool(&pairings[2], exclude)?,
        ];

        let mut clues = Vec::with_capacity(3);
        for (pairing, pool) in pairings.iter().zip(&pools) {
            let used = clues.iter().map(|clue: &Clue| clue.number).collect();
            clues.push(draw_preferring_unused(rng, pairing, pool, used)?);
        }

        if !all_distinct(&clues) {
            let reroll = Bernoulli::new(probability.clamp(0.0, 1.0))
                .is_ok_and(|coin| coin.sample(rng));
            if reroll {
                let used = clues[..2].iter().map(|clue| clue.number).collect();
                let replaced = draw_preferring_unused(rng, &pairings[2], &pools[2], used)?;
                log::info!(
                    "clue numbers collided, rerolled {} {} as {}",
                    replaced.pos,
                    clues[2].word,
                    replaced.word
                );
                clues[2] = replaced;
            }
            if !all_distinct(&clues) {
                log::warn!("reroll policy kept a puzzle with repeated clue numbers");
            }
        }

        finish(into_array(clues), 1)
    }

    fn pairings(&self, rng: &mut Pcg64) -> [Pairing; 3] {
        let mut parts = PartOfSpeech::ALL;
        parts.shuffle(rng);
        let mut rules = NumberingRule::ALL;
        rules.shuffle(rng);
        let categories = if self.config.length_spread {
            let mut categories = LengthCategory::ALL;
            categories.shuffle(rng);
            categories.map(Some)
        } else {
            [None; 3]
        };
        [0, 1, 2].map(|i| Pairing {
            pos: parts[i],
            rule: rules[i],
            category: categories[i],
        })
    }

    fn pool(
        &self,
        pairing: &Pairing,
        exclude: Option<&UsageLedger>,
    ) -> Result<Vec<&'a Word>, AttemptError> {
        let pool: Vec<_> = self
            .vocabulary
            .words_of(pairing.pos, pairing.category)
            .iter()
            .filter(|word| pairing.rule.is_eligible(word))
            .filter(|word| exclude.is_none_or(|ledger| !ledger.contains(word)))
            .collect();
        if pool.is_empty() {
            return Err(AttemptError::PoolExhausted {
                pos: pairing.pos,
                rule: pairing.rule,
                category: pairing.category,
            });
        }
        Ok(pool)
    }
}

fn draw_preferring_unused(
    rng: &mut Pcg64,
    pairing: &Pairing,
    pool: &[&Word],
    used: ClueNumberSet,
) -> Result<Clue, AttemptError> {
    let exhausted = || AttemptError::PoolExhausted {
        pos: pairing.pos,
        rule: pairing.rule,
        category: pairing.category,
    };
    let &word = pool.choose(rng).ok_or_else(exhausted)?;
    let numbers = pairing.rule.apply(word).unwrap_or_default();
    let unused = numbers.difference(used);
    let candidates = if unused.is_empty() { numbers } else { unused };
    let number = choose_number(rng, candidates).ok_or_else(exhausted)?;
    Ok(Clue {
        pos: pairing.pos,
        word: word.clone(),
        rule: pairing.rule,
        number,
    })
}

fn choose_number(rng: &mut Pcg64, candidates: ClueNumberSet) -> Option<ClueNumber> {
    match candidates.len() {
        0 => None,
        // Skip the RNG for unambiguous numbers so single-valued rules do not
        // shift the stream.
        1 => candidates.iter().next(),
        _ => candidates.iter().collect::<Vec<_>>().choose(rng).copied(),
    }
}

fn all_distinct(clues: &[Clue]) -> bool {
    let numbers: ClueNumberSet = clues.iter().map(|clue| clue.number).collect();
    numbers.len() == clues.len()
}

fn into_array(clues: Vec<Clue>) -> [Clue; 3] {
    clues
        .try_into()
        .unwrap_or_else(|_| unreachable!("one clue is drawn per pairing"))
}

fn finish(clues: [Clue; 3], attempts: usize) -> Result<Selection, SelectError> {
    let order = clues.each_ref().map(|clue| clue.pos);
    let puzzle = Puzzle::new(clues).map_err(SelectError::Invalid)?;
    Ok(Selection {
        puzzle,
        order,
        attempts,
    })
}
