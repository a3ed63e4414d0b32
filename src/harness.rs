//! Running the solver against many simulated puzzles.

use indicatif::ParallelProgressIterator;
use rand::{rngs::StdRng, seq::index::sample, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    feedback::FeedbackRule,
    hint::LocalHints,
    opening::OpeningHeuristic,
    perf::{Perf, Try},
    solver::Solver,
    word::Word,
    words::Wordlist,
    WordleError,
};

/// A test harness that plays many games against answers drawn from a
/// dictionary.
///
/// Create one with [`new()`](Harness::new()) and configure it with the
/// builder methods, each of which consumes the harness and returns a new one.
///
/// Every game gets its own solver seeded from the harness seed and the
/// game's index, so a run with a fixed seed is reproducible no matter how
/// rayon schedules the games.
///
/// # Examples
///
/// ```rust
/// # use wordle_cheat::{Harness, Wordlist};
/// let words = Wordlist::from_reader("apple\nbrown\ncrane\napply\n".as_bytes())?;
///
/// let perf = Harness::new().quiet().seed(3).test_all().run(&words)?;
/// assert_eq!(perf.num_tried(), 4);
/// #
/// # Ok::<_, wordle_cheat::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    verbose: bool,
    num_games: Option<usize>,
    seed: Option<u64>,
    rule: FeedbackRule,
    heuristic: OpeningHeuristic,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            verbose: false,
            num_games: Some(100),
            seed: None,
            rule: FeedbackRule::default(),
            heuristic: OpeningHeuristic::default(),
        }
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. quiet mode
    /// 2. plays 100 games against answers chosen at random
    /// 3. seeds from entropy
    /// 4. independent per-letter feedback
    /// 5. the default opening heuristic
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a progress bar while testing.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Plays one game for every word in the dictionary.
    pub fn test_all(self) -> Self {
        Harness {
            num_games: None,
            ..self
        }
    }

    /// Plays `n` games against distinct random answers.
    ///
    /// `n` is capped at the size of the dictionary when the harness runs.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_games: Some(n),
            ..self
        }
    }

    /// Fixes the seed used to pick answers and drive every solver.
    pub fn seed(self, seed: u64) -> Self {
        Harness {
            seed: Some(seed),
            ..self
        }
    }

    /// Sets how the simulated puzzles compute feedback.
    pub fn rule(self, rule: FeedbackRule) -> Self {
        Harness { rule, ..self }
    }

    pub fn heuristic(self, heuristic: OpeningHeuristic) -> Self {
        Harness { heuristic, ..self }
    }

    /// Runs the harness and records how every game went.
    pub fn run(&self, words: &Wordlist) -> Result<Perf, WordleError> {
        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);

        let answers: Vec<Word> = match self.num_games {
            Some(n) => sample(&mut rng, words.len(), n.min(words.len()))
                .iter()
                .map(|i| words[i])
                .collect(),
            None => words.to_vec(),
        };
        log::info!("playing {} games with seed {}", answers.len(), seed);

        let games = answers.par_iter().enumerate();
        let tries = if self.verbose {
            games
                .progress_count(answers.len() as u64)
                .map(|(i, answer)| self.play(words, seed, i, *answer))
                .collect::<Result<Vec<_>, WordleError>>()?
        } else {
            games
                .map(|(i, answer)| self.play(words, seed, i, *answer))
                .collect::<Result<Vec<_>, WordleError>>()?
        };

        Ok(Perf::new(tries, seed))
    }

    fn play(&self, words: &Wordlist, seed: u64, index: usize, answer: Word) -> Result<Try, WordleError> {
        let rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
        let mut solver = Solver::with_heuristic(words.pool(), &self.heuristic, rng);
        let mut hints = LocalHints::new(answer).rule(self.rule);

        let outcome = solver.run(&mut hints)?;
        Ok(Try {
            answer,
            outcome,
            attempts: solver.attempts().clone(),
        })
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints a summary.
    pub fn run_and_summarize(&self, words: &Wordlist) -> Result<Perf, WordleError> {
        let perf = self.run(words)?;
        perf.to_summary().print()?;
        Ok(perf)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn words() -> Wordlist {
        Wordlist::from_reader(include_str!("../words.txt").as_bytes()).unwrap()
    }

    #[test]
    fn plays_requested_number_of_games() {
        let words = words();
        let perf = Harness::new().seed(1).test_num(25).run(&words).unwrap();
        assert_eq!(perf.num_tried(), 25);
        assert!(perf.tries().iter().all(|t| t.attempts.len() <= 6));
    }

    #[test]
    fn caps_games_at_dictionary_size() {
        let words = Wordlist::from_reader("apple\napply\n".as_bytes()).unwrap();
        let perf = Harness::new().seed(1).test_num(50).run(&words).unwrap();
        assert_eq!(perf.num_tried(), 2);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let words = words();
        let harness = Harness::new().seed(42).test_num(30).rule(FeedbackRule::Counted);
        let a = harness.run(&words).unwrap();
        let b = harness.run(&words).unwrap();
        assert_eq!(a.tries(), b.tries());
    }

    #[test]
    fn answers_in_dictionary_are_never_lost() {
        // the answer is always a candidate, so a game can only end by solving
        // or by running out of guesses with candidates left
        let words = words();
        let perf = Harness::new().seed(7).test_all().run(&words).unwrap();
        assert_eq!(perf.num_tried() as usize, words.len());
        for t in perf.tries() {
            match t.outcome {
                crate::Outcome::Solved { answer, turns } => {
                    assert_eq!(answer, t.answer);
                    assert_eq!(turns, t.attempts.len());
                }
                crate::Outcome::Exhausted { remaining } => {
                    assert!(remaining > 0);
                    assert_eq!(t.attempts.len(), 6);
                }
            }
        }
    }
}
