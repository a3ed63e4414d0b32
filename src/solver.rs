//! The turn-by-turn solve loop.

use std::fmt::Display;

use rand::{seq::SliceRandom, Rng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    feedback::Feedback,
    filter,
    hint::{HintSource, Observation},
    opening::{Opening, OpeningHeuristic},
    word::Word,
    HintError,
};

/// The most guesses a game allows, opening guesses included.
pub const MAX_GUESSES: usize = 6;

/// Where a [`Solver`] is in its game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The next guess is the first opening word.
    AwaitingOpening1,

    /// The next guess is the second opening word.
    AwaitingOpening2,

    /// The next guess is picked at random from the candidate pool.
    Guessing,

    /// The hint source reported the last guess as correct.
    Solved,

    /// Out of guesses or out of candidates.
    Exhausted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Solved | Phase::Exhausted)
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "snake_case")
)]
pub enum Outcome {
    /// `answer` was guessed on turn `turns`.
    Solved { answer: Word, turns: usize },

    /// The game ended without a solve, with `remaining` candidates left.
    Exhausted { remaining: usize },
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }
}

/// The guesses submitted during one game, in order.
///
/// There are never more than [`MAX_GUESSES`] of them.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Attempts {
    inner: Vec<Word>,
}

impl Attempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attempt. Hands the word back if six have been made already.
    pub(crate) fn push(&mut self, word: Word) -> Result<usize, Word> {
        if self.inner.len() < MAX_GUESSES {
            self.inner.push(word);
            Ok(self.inner.len() - 1)
        } else {
            Err(word)
        }
    }

    /// Returns a slice into the underlying data.
    pub fn inner(&self) -> &[Word] {
        self.inner.as_slice()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn last(&self) -> Option<&Word> {
        self.inner.last()
    }

    /// Returns true once all six guesses have been used.
    pub fn finished(&self) -> bool {
        self.inner.len() >= MAX_GUESSES
    }
}

impl Display for Attempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.inner.split_last() {
            for word in rest {
                writeln!(f, "{}", word)?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

/// One completed turn, as returned by [`Solver::step()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub guess: Word,
    pub feedback: Feedback,
    pub solved: bool,
    /// Candidates left after filtering.
    pub remaining: usize,
}

/// Solves one puzzle by narrowing a candidate pool turn after turn.
///
/// The solver opens with the two words picked by an [`OpeningHeuristic`],
/// then guesses uniformly at random from whatever candidates survive. All
/// randomness comes from the `R` it is built with, so a seeded generator
/// gives a reproducible game.
///
/// # Examples
///
/// ```rust
/// # use wordle_cheat::{LocalHints, Outcome, Solver, Word};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let pool: Vec<Word> = ["apple", "brown", "crane", "apply"]
///     .iter()
///     .map(|w| Word::new(w))
///     .collect::<Result<_, _>>()?;
///
/// let mut solver = Solver::new(pool, StdRng::seed_from_u64(1));
/// let mut hints = LocalHints::new(Word::new("apple")?);
///
/// let outcome = solver.run(&mut hints)?;
/// assert!(outcome.is_solved());
/// assert!(solver.attempts().len() <= 6);
/// #
/// # Ok::<_, wordle_cheat::WordleError>(())
/// ```
#[derive(Debug)]
pub struct Solver<R> {
    pool: Vec<Word>,
    opening: Option<Opening>,
    attempts: Attempts,
    knowledge: Feedback,
    phase: Phase,
    rng: R,
}

impl<R: Rng> Solver<R> {
    /// Creates a solver over `pool` using the default [`OpeningHeuristic`].
    pub fn new(pool: Vec<Word>, rng: R) -> Self {
        Self::with_heuristic(pool, &OpeningHeuristic::default(), rng)
    }

    /// Creates a solver over `pool`, choosing its opening pair with
    /// `heuristic`.
    ///
    /// The opening pair is fixed here and not revisited once feedback comes
    /// in. An empty pool gives a solver that is already exhausted.
    pub fn with_heuristic(pool: Vec<Word>, heuristic: &OpeningHeuristic, mut rng: R) -> Self {
        let opening = heuristic.choose(&pool, &mut rng);
        let phase = match opening {
            Some(_) => Phase::AwaitingOpening1,
            None => Phase::Exhausted,
        };

        Solver {
            pool,
            opening,
            attempts: Attempts::new(),
            knowledge: Feedback::new(),
            phase,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The words still consistent with every observation so far.
    pub fn pool(&self) -> &[Word] {
        &self.pool
    }

    pub fn opening(&self) -> Option<Opening> {
        self.opening
    }

    pub fn attempts(&self) -> &Attempts {
        &self.attempts
    }

    /// Everything learned about the answer so far.
    pub fn knowledge(&self) -> &Feedback {
        &self.knowledge
    }

    /// The outcome of the game, once it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Solved => self.attempts.last().map(|&answer| Outcome::Solved {
                answer,
                turns: self.attempts.len(),
            }),
            Phase::Exhausted => Some(Outcome::Exhausted {
                remaining: self.pool.len(),
            }),
            _ => None,
        }
    }

    fn next_guess(&mut self) -> Option<Word> {
        match self.phase {
            Phase::AwaitingOpening1 => self.opening.map(|o| o.first),
            Phase::AwaitingOpening2 => self.opening.map(|o| o.second),
            Phase::Guessing => self.pool.choose(&mut self.rng).copied(),
            Phase::Solved | Phase::Exhausted => None,
        }
    }

    /// Plays a single turn.
    ///
    /// Submits the next guess to `hints`, narrows the pool with the feedback
    /// and moves to the next phase. Returns `Ok(None)` without doing anything
    /// once the game is over.
    ///
    /// An error from `hints` is returned as is. The guess is not recorded and
    /// the phase does not change.
    pub fn step<H: HintSource + ?Sized>(&mut self, hints: &mut H) -> Result<Option<Turn>, HintError> {
        let guess = match self.next_guess() {
            Some(guess) => guess,
            None => {
                if !self.phase.is_terminal() {
                    self.phase = Phase::Exhausted;
                }
                return Ok(None);
            }
        };

        let Observation { feedback, solved } = hints.submit_and_observe(&guess)?;

        let before = self.pool.len();
        self.pool = filter::narrow(&self.pool, &feedback);
        self.knowledge.merge(&feedback);
        if self.attempts.push(guess).is_err() {
            // unreachable while the phase checks below hold
            self.phase = Phase::Exhausted;
            return Ok(None);
        }

        log::debug!(
            "turn {}: guessed {}, {} -> {} candidates ({})",
            self.attempts.len(),
            guess,
            before,
            self.pool.len(),
            feedback
        );

        self.phase = if solved {
            Phase::Solved
        } else if self.attempts.finished() || self.pool.is_empty() {
            Phase::Exhausted
        } else if self.phase == Phase::AwaitingOpening1 {
            Phase::AwaitingOpening2
        } else {
            Phase::Guessing
        };

        Ok(Some(Turn {
            guess,
            feedback,
            solved,
            remaining: self.pool.len(),
        }))
    }

    /// Plays turns until the game is over.
    pub fn run<H: HintSource + ?Sized>(&mut self, hints: &mut H) -> Result<Outcome, HintError> {
        self.run_with(hints, |_| {})
    }

    /// Like [`run()`](Self::run()), but calls `on_turn` after every turn.
    pub fn run_with<H, F>(&mut self, hints: &mut H, mut on_turn: F) -> Result<Outcome, HintError>
    where
        H: HintSource + ?Sized,
        F: FnMut(&Turn),
    {
        loop {
            if let Some(outcome) = self.outcome() {
                log::info!("{:?} after {} guesses", outcome, self.attempts.len());
                return Ok(outcome);
            }
            if let Some(turn) = self.step(hints)? {
                on_turn(&turn);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::hint::LocalHints;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn pool(words: &[&str]) -> Vec<Word> {
        words.iter().map(|w| word(w)).collect()
    }

    /// Replays a fixed list of observations.
    struct Scripted {
        observations: Vec<Observation>,
        seen: Vec<Word>,
    }

    impl HintSource for Scripted {
        fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError> {
            self.seen.push(*guess);
            if self.observations.is_empty() {
                Err(HintError::Unavailable("script ran out".to_string()))
            } else {
                Ok(self.observations.remove(0))
            }
        }
    }

    #[test]
    fn empty_dictionary_is_exhausted() {
        let mut solver = Solver::new(Vec::new(), StdRng::seed_from_u64(0));
        assert_eq!(solver.phase(), Phase::Exhausted);

        let mut hints = LocalHints::new(word("apple"));
        assert_eq!(
            solver.run(&mut hints).unwrap(),
            Outcome::Exhausted { remaining: 0 }
        );
        assert!(solver.attempts().is_empty());
    }

    #[test]
    fn solves_small_dictionary() {
        let words = pool(&["apple", "brown", "crane", "apply"]);
        for seed in 0..16 {
            let mut solver = Solver::new(words.clone(), StdRng::seed_from_u64(seed));
            let mut hints = LocalHints::new(word("apple"));
            let outcome = solver.run(&mut hints).unwrap();

            assert_eq!(
                outcome,
                Outcome::Solved {
                    answer: word("apple"),
                    turns: solver.attempts().len()
                }
            );
            assert_eq!(solver.attempts().last(), Some(&word("apple")));
            assert!(solver.attempts().len() <= 3);
        }
    }

    #[test]
    fn openings_come_first() {
        let words = pool(&["heart", "doing", "lumpy", "ocean", "tonal", "fuzzy"]);
        let mut solver = Solver::new(words, StdRng::seed_from_u64(5));
        let opening = solver.opening().unwrap();
        let mut hints = LocalHints::new(word("fuzzy"));

        let first = solver.step(&mut hints).unwrap().unwrap();
        assert_eq!(first.guess, opening.first);
        assert_eq!(solver.phase(), Phase::AwaitingOpening2);

        let second = solver.step(&mut hints).unwrap().unwrap();
        assert_eq!(second.guess, opening.second);
    }

    #[test]
    fn second_opening_survives_being_filtered_out() {
        let words = pool(&["heart", "lions", "chips", "thumb"]);
        let mut solver = Solver::new(words, StdRng::seed_from_u64(1));
        let mut hints = LocalHints::new(word("thumb"));

        let first = solver.step(&mut hints).unwrap().unwrap();
        assert_eq!(first.guess, word("heart"));
        assert_eq!(solver.pool(), &[word("thumb")][..]);
        assert_eq!(solver.phase(), Phase::AwaitingOpening2);

        let second = solver.step(&mut hints).unwrap().unwrap();
        assert_eq!(second.guess, word("lions"));
        assert!(!second.solved);

        assert_eq!(
            solver.run(&mut hints).unwrap(),
            Outcome::Solved {
                answer: word("thumb"),
                turns: 3
            }
        );
    }

    #[test]
    fn solved_on_first_guess() {
        let words = pool(&["heart", "lumpy"]);
        let mut solver = Solver::new(words, StdRng::seed_from_u64(0));
        let mut hints = LocalHints::new(word("heart"));

        let turn = solver.step(&mut hints).unwrap().unwrap();
        assert!(turn.solved);
        assert!(turn.feedback.is_complete());
        assert_eq!(solver.phase(), Phase::Solved);
        assert_eq!(
            solver.outcome(),
            Some(Outcome::Solved {
                answer: word("heart"),
                turns: 1
            })
        );
        assert_eq!(solver.step(&mut hints).unwrap(), None);
        assert_eq!(solver.attempts().len(), 1);
    }

    #[test]
    fn answer_outside_dictionary_exhausts_pool() {
        let words = pool(&["apple", "apply", "ample"]);
        let mut solver = Solver::new(words, StdRng::seed_from_u64(2));
        let mut hints = LocalHints::new(word("brown"));

        let outcome = solver.run(&mut hints).unwrap();
        assert_eq!(outcome, Outcome::Exhausted { remaining: 0 });
        assert_eq!(solver.attempts().len(), 1);
    }

    #[test]
    fn never_more_than_six_guesses() {
        // feedback that never narrows anything keeps the game going
        let words = pool(&["apple", "apply", "ample", "maple", "lapse", "pales", "leaps"]);
        let mut hints = Scripted {
            observations: vec![
                Observation {
                    feedback: Feedback::new(),
                    solved: false,
                };
                10
            ],
            seen: Vec::new(),
        };
        let mut solver = Solver::new(words.clone(), StdRng::seed_from_u64(9));

        let mut turns = 0;
        let outcome = solver.run_with(&mut hints, |_| turns += 1).unwrap();
        assert_eq!(
            outcome,
            Outcome::Exhausted {
                remaining: words.len()
            }
        );
        assert_eq!(turns, MAX_GUESSES);
        assert_eq!(solver.attempts().len(), MAX_GUESSES);
        assert_eq!(hints.seen.len(), MAX_GUESSES);
    }

    #[test]
    fn hint_errors_propagate() {
        let words = pool(&["apple", "apply"]);
        let mut hints = Scripted {
            observations: Vec::new(),
            seen: Vec::new(),
        };
        let mut solver = Solver::new(words, StdRng::seed_from_u64(0));

        assert!(matches!(
            solver.run(&mut hints),
            Err(HintError::Unavailable(_))
        ));
        assert!(solver.attempts().is_empty());
        assert_eq!(solver.phase(), Phase::AwaitingOpening1);
        assert_eq!(hints.seen.len(), 1);
    }

    #[test]
    fn knowledge_accumulates() {
        let words = pool(&["apple", "brown", "crane", "apply", "ample", "maple"]);
        let mut solver = Solver::new(words, StdRng::seed_from_u64(4));
        let mut hints = LocalHints::new(word("apple"));
        solver.run(&mut hints).unwrap();

        let known = solver.knowledge();
        assert!(known.is_complete());
        assert!(solver.pool().contains(&word("apple")));
        for letter in known.absent().iter() {
            assert!(!word("apple").has(letter));
        }
    }
}
