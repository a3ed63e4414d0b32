//! Comparing a guess to an answer.

use std::fmt::Display;

use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::word::{LetterSet, Word, WORD_LEN};

/// What is known about a single position of the answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// Nothing is confirmed at this position yet.
    Unconfirmed,

    /// The answer holds this letter at this position.
    Confirmed(u8),
}

impl Default for Slot {
    fn default() -> Self {
        Slot::Unconfirmed
    }
}

impl Slot {
    /// Returns the confirmed letter, if any.
    pub fn letter(&self) -> Option<u8> {
        match self {
            Slot::Confirmed(c) => Some(*c),
            Slot::Unconfirmed => None,
        }
    }
}

/// A Wordle "grade" that indicates the correctness of a letter in a guess.
///
/// `Correct` means that the letter is in the correct position. `Almost` means
/// that the letter is in the word, but not in that position. `Incorrect` means
/// that the word does not contain that letter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Grade {
    /// A grade that indicates the letter guessed is in the correct position.
    Correct,

    /// A grade that indicates the letter guessed is in the word, but not there.
    Almost,

    /// A grade that indicates the letter guesses is not in the word.
    Incorrect,
}

impl Grade {
    /// Grades `guess` against `answer` the way Wordle itself does.
    ///
    /// In the case that a guess contains two or more of the same letter,
    /// the following is true:
    ///
    /// 1. Every copy of that letter in the correct position gets
    ///    [`Grade::Correct`].
    /// 2. There are never more copies of [`Grade::Correct`] and
    ///    [`Grade::Almost`] together than copies of that letter in the
    ///    answer. For instance, if the answer is `sober` and you guess
    ///    `spool`, the first `o` gets [`Grade::Almost`] and the second
    ///    [`Grade::Incorrect`].
    pub fn grade(guess: &Word, answer: &Word) -> [Grade; WORD_LEN] {
        use std::cmp::Ordering;

        let mut used = [0_u8; 26];
        let mut res = [Grade::Incorrect; WORD_LEN];
        let count = |c: u8| answer.letters().iter().filter(|&&a| a == c).count() as u8;
        let i = |c: u8| (c - b'a') as usize;

        // go through correct letters first, since those get priority
        for (pos, (g, a)) in guess
            .letters()
            .iter()
            .zip(answer.letters().iter())
            .enumerate()
            .sorted_unstable_by(|&(a_i, (a_g, a_a)), &(b_i, (b_g, b_a))| {
                let a_correct = a_g == a_a;
                let b_correct = b_g == b_a;
                match a_correct.cmp(&b_correct).reverse() {
                    Ordering::Equal => a_i.cmp(&b_i),
                    other => other,
                }
            })
        {
            if g == a {
                used[i(*g)] += 1;
                res[pos] = Grade::Correct;
            } else if used[i(*g)] < count(*g) {
                used[i(*g)] += 1;
                res[pos] = Grade::Almost;
            }
        }

        res
    }

    /// Parses a tile grade typed by a person.
    ///
    /// `g`/`2` is correct, `y`/`1` is almost and `b`/`x`/`0`/`.` is incorrect.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Grade::Correct),
            'y' | '1' => Some(Grade::Almost),
            'b' | 'x' | '0' | '.' => Some(Grade::Incorrect),
            _ => None,
        }
    }
}

/// How a local hint source turns a guess and an answer into [`Feedback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackRule {
    /// Each guessed letter is checked on its own, ignoring how many copies
    /// the answer holds. See [`Feedback::compute()`].
    Independent,

    /// Letters are graded with [`Grade::grade()`], counting duplicates.
    Counted,
}

impl Default for FeedbackRule {
    fn default() -> Self {
        FeedbackRule::Independent
    }
}

impl FeedbackRule {
    pub fn apply(&self, guess: &Word, answer: &Word) -> Feedback {
        match self {
            FeedbackRule::Independent => Feedback::compute(guess, answer),
            FeedbackRule::Counted => Feedback::from_grades(guess, &Grade::grade(guess, answer)),
        }
    }
}

/// The result of comparing a guess to an answer.
///
/// A letter is never in `absent` while it is also in `present` or confirmed
/// in `positions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Feedback {
    positions: [Slot; WORD_LEN],
    present: LetterSet,
    absent: LetterSet,
}

impl Feedback {
    /// Creates feedback that carries no information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `guess` to `answer` one index at a time.
    ///
    /// A letter in the right place is confirmed at that index. Any guessed
    /// letter found somewhere in the answer is present, including confirmed
    /// ones, and every other guessed letter is absent. Duplicate letters are
    /// not counted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wordle_cheat::{Feedback, Slot, Word};
    /// let feedback = Feedback::compute(&Word::new("crane")?, &Word::new("apple")?);
    ///
    /// assert_eq!(feedback.positions()[4], Slot::Confirmed(b'e'));
    /// assert!(feedback.present().contains(b'a'));
    /// assert!(feedback.absent().contains(b'c'));
    /// #
    /// # Ok::<_, wordle_cheat::WordError>(())
    /// ```
    pub fn compute(guess: &Word, answer: &Word) -> Self {
        let mut feedback = Feedback::new();
        for (i, (&g, &a)) in guess.letters().iter().zip(answer.letters()).enumerate() {
            if g == a {
                feedback.positions[i] = Slot::Confirmed(g);
            }
            if answer.has(g) {
                feedback.present.insert(g);
            } else {
                feedback.absent.insert(g);
            }
        }
        feedback
    }

    /// Builds feedback from the graded tiles of one guess.
    ///
    /// When a repeated letter is graded incorrect in one tile but correct or
    /// almost in another, the better grade wins and the letter is not marked
    /// absent.
    pub fn from_grades(guess: &Word, grades: &[Grade; WORD_LEN]) -> Self {
        let mut feedback = Feedback::new();
        for (i, (&c, grade)) in guess.letters().iter().zip(grades.iter()).enumerate() {
            match grade {
                Grade::Correct => feedback.positions[i] = Slot::Confirmed(c),
                Grade::Almost => feedback.present.insert(c),
                Grade::Incorrect => feedback.absent.insert(c),
            }
        }
        feedback.absent = feedback
            .absent
            .difference(feedback.present.union(feedback.confirmed()));
        feedback
    }

    /// The per-tile grades this feedback implies for `guess`.
    ///
    /// Used to render feedback the way a puzzle shows it.
    pub fn grades(&self, guess: &Word) -> [Grade; WORD_LEN] {
        let mut res = [Grade::Incorrect; WORD_LEN];
        for (i, &c) in guess.letters().iter().enumerate() {
            res[i] = match self.positions[i] {
                Slot::Confirmed(k) if k == c => Grade::Correct,
                _ if self.present.contains(c) || self.confirmed().contains(c) => Grade::Almost,
                _ => Grade::Incorrect,
            };
        }
        res
    }

    pub fn positions(&self) -> &[Slot; WORD_LEN] {
        &self.positions
    }

    pub fn present(&self) -> LetterSet {
        self.present
    }

    pub fn absent(&self) -> LetterSet {
        self.absent
    }

    /// The letters confirmed at some position.
    pub fn confirmed(&self) -> LetterSet {
        self.positions.iter().filter_map(Slot::letter).collect()
    }

    /// Returns true if every position is confirmed.
    pub fn is_complete(&self) -> bool {
        self.positions.iter().all(|s| s.letter().is_some())
    }

    /// Folds the feedback of a later guess into accumulated knowledge.
    ///
    /// Confirmed positions are never cleared, and a letter known to be in the
    /// answer is never moved to `absent`.
    pub fn merge(&mut self, other: &Feedback) {
        for (mine, theirs) in self.positions.iter_mut().zip(other.positions.iter()) {
            if let (Slot::Unconfirmed, Slot::Confirmed(_)) = (*mine, theirs) {
                *mine = *theirs;
            }
        }
        self.present = self.present.union(other.present);
        self.absent = self
            .absent
            .union(other.absent)
            .difference(self.present.union(self.confirmed()));
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for slot in &self.positions {
            match slot {
                Slot::Confirmed(c) => write!(f, "{}", *c as char)?,
                Slot::Unconfirmed => write!(f, "_")?,
            }
        }
        write!(f, " present {} absent {}", self.present, self.absent)
    }
}
