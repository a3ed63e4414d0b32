//! Sources of feedback for submitted guesses.
//!
//! The solver only ever talks to a [`HintSource`]. [`LocalHints`] simulates a
//! puzzle with a known answer, [`TranscribedHints`] relays a live puzzle
//! through a person typing in the tile colors, and [`Settled`] adds a pause
//! after each submission for surfaces that need time to render.

use std::{
    io::{BufRead, Write},
    thread,
    time::Duration,
};

use crate::{
    feedback::{Feedback, FeedbackRule, Grade},
    word::{Word, WORD_LEN},
    HintError,
};

/// What a hint source reports back for one guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub feedback: Feedback,
    pub solved: bool,
}

/// Something that accepts a guess and reports how good it was.
///
/// A guess is submitted exactly once; implementations should not expect to
/// see it again after returning an error.
pub trait HintSource {
    fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError>;
}

impl<H: HintSource + ?Sized> HintSource for &mut H {
    fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError> {
        (**self).submit_and_observe(guess)
    }
}

impl<H: HintSource + ?Sized> HintSource for Box<H> {
    fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError> {
        (**self).submit_and_observe(guess)
    }
}

/// A simulated puzzle with a held-out answer.
///
/// # Examples
///
/// ```rust
/// # use wordle_cheat::{HintSource, LocalHints, Word};
/// let mut hints = LocalHints::new(Word::new("apple")?);
///
/// let observation = hints.submit_and_observe(&Word::new("crane")?)?;
/// assert!(!observation.solved);
///
/// let observation = hints.submit_and_observe(&Word::new("apple")?)?;
/// assert!(observation.solved);
/// #
/// # Ok::<_, wordle_cheat::WordleError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocalHints {
    answer: Word,
    rule: FeedbackRule,
}

impl LocalHints {
    /// Creates a simulated puzzle using [`FeedbackRule::Independent`].
    pub fn new(answer: Word) -> Self {
        LocalHints {
            answer,
            rule: FeedbackRule::default(),
        }
    }

    /// Sets the rule used to compute feedback.
    pub fn rule(self, rule: FeedbackRule) -> Self {
        LocalHints { rule, ..self }
    }

    pub fn answer(&self) -> Word {
        self.answer
    }
}

impl HintSource for LocalHints {
    fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError> {
        Ok(Observation {
            feedback: self.rule.apply(guess, &self.answer),
            solved: *guess == self.answer,
        })
    }
}

/// A live puzzle relayed by a person.
///
/// Each guess is written to `output` along with a prompt. The person enters
/// it into the puzzle and types back the five tile colors: `g` for green,
/// `y` for yellow and `b` for gray. Five greens means the puzzle is solved.
/// Lines that cannot be read as five grades are asked for again, since the
/// guess has already been entered.
#[derive(Debug)]
pub struct TranscribedHints<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TranscribedHints<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TranscribedHints { input, output }
    }

    fn read_grades(&mut self) -> Result<[Grade; WORD_LEN], HintError> {
        loop {
            write!(self.output, "tiles (g/y/b): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(HintError::Unavailable(
                    "input closed before the tiles were entered".to_string(),
                ));
            }

            match parse_grades(line.trim()) {
                Some(grades) => return Ok(grades),
                None => writeln!(
                    self.output,
                    "could not read {:?}, expected five of g, y or b",
                    line.trim()
                )?,
            }
        }
    }
}

fn parse_grades(line: &str) -> Option<[Grade; WORD_LEN]> {
    let grades: Vec<Grade> = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Grade::from_char)
        .collect::<Option<_>>()?;
    <[Grade; WORD_LEN]>::try_from(grades).ok()
}

impl<R: BufRead, W: Write> HintSource for TranscribedHints<R, W> {
    fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError> {
        writeln!(self.output, "guess: {}", guess.to_ascii_uppercase())?;
        let grades = self.read_grades()?;

        Ok(Observation {
            feedback: Feedback::from_grades(guess, &grades),
            solved: grades.iter().all(|g| *g == Grade::Correct),
        })
    }
}

/// Waits a fixed time after every submission before handing back the
/// observation.
#[derive(Clone, Debug)]
pub struct Settled<H> {
    inner: H,
    delay: Duration,
}

impl<H: HintSource> Settled<H> {
    pub fn new(inner: H, delay: Duration) -> Self {
        Settled { inner, delay }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: HintSource> HintSource for Settled<H> {
    fn submit_and_observe(&mut self, guess: &Word) -> Result<Observation, HintError> {
        let observation = self.inner.submit_and_observe(guess)?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(observation)
    }
}
