//! Evaluating how the solver did over many games.

use std::{fmt::Display, io::Write};

use comfy_table::{Cell, Color, ColumnConstraint, Row, Table, Width};
use owo_colors::{AnsiColors, OwoColorize, Stream};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    solver::{Attempts, Outcome, MAX_GUESSES},
    word::Word,
    WordleError,
};

/// One game played by the [test harness](crate::Harness).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Try {
    pub answer: Word,
    pub outcome: Outcome,
    pub attempts: Attempts,
}

/// A record of every game run by the [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Perf {
    tries: Vec<Try>,
    seed: u64,
}

impl Perf {
    pub(crate) fn new(tries: Vec<Try>, seed: u64) -> Self {
        Perf { tries, seed }
    }

    pub fn tries(&self) -> &[Try] {
        &self.tries
    }

    /// The seed the games were played with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Gets the number of puzzles attempted.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of puzzles solved.
    pub fn num_solved(&self) -> u32 {
        self.tries.iter().filter(|t| t.outcome.is_solved()).count() as u32
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.tries.iter().map(|t| t.attempts.len() as u32).sum()
    }

    /// Gets the number of puzzles the solver could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried() - self.num_solved()
    }

    /// Prints the summary and then a table showing the guesses for each
    /// puzzle. Missed puzzles are highlighted in red.
    pub fn print(&self) -> Result<(), WordleError> {
        self.to_summary().print()?;
        let mut table = Table::new();
        if !table.is_tty() {
            table.set_table_width(80);
        } else {
            table.load_preset(comfy_table::presets::UTF8_FULL);
        }
        let columns = (table.get_table_width().unwrap_or(80) / 9).max(1) as usize;
        for chunk in self.tries.chunks(columns) {
            let mut row = Row::new();
            for t in chunk {
                let mut cell = Cell::new(format!("{}\n-----\n{}", t.answer, t.attempts));
                if !t.outcome.is_solved() {
                    cell = cell.bg(Color::Red).fg(Color::Black);
                }
                row.add_cell(cell);
            }
            table.add_row(row);
        }
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5));
            columns
        ]);
        println!("{}", table);
        Ok(())
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut histogram = [0; MAX_GUESSES];

        self.tries
            .iter()
            .filter_map(|t| match t.outcome {
                Outcome::Solved { turns, .. } => Some(turns),
                Outcome::Exhausted { .. } => None,
            })
            .for_each(|n| histogram[n - 1] += 1);

        Summary {
            num_tried: self.num_tried(),
            num_solved: self.num_solved(),
            cumulative_guesses: self.cumulative_guesses(),
            histogram,
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of the solver's performance generated by the
/// [test harness](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Summary {
    num_tried: u32,
    num_solved: u32,
    cumulative_guesses: u32,
    histogram: [u32; MAX_GUESSES],
}

impl Summary {
    /// Gets the number of puzzles attempted.
    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of puzzles solved.
    ///
    /// This function always returns a number less than or equal to
    /// [`num_tried()`](Summary::num_tried()).
    pub fn num_solved(&self) -> u32 {
        self.num_solved
    }

    /// Gets the fraction of puzzles solved.
    ///
    /// Returns zero if no puzzles were attempted.
    pub fn frac_solved(&self) -> f32 {
        if self.num_tried == 0 {
            return 0.;
        }
        (self.num_solved as f32) / (self.num_tried as f32)
    }

    /// Gets the number of guesses across all puzzle attempts.
    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the number of guesses across all solved puzzles.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.histogram
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32 + 1) * v)
            .sum::<u32>()
    }

    /// Gets the average number of guesses needed to solve a puzzle.
    ///
    /// This function does not include guesses made on puzzles that the
    /// solver was unable to solve, and is zero if nothing was solved.
    pub fn mean_guesses(&self) -> f32 {
        if self.num_solved == 0 {
            return 0.;
        }
        (self.cumulative_guesses_solved() as f32) / (self.num_solved as f32)
    }

    /// Gets the number of puzzles the solver could not solve.
    pub fn num_missed(&self) -> u32 {
        self.num_tried - self.num_solved
    }

    /// Gets the fraction of puzzles the solver could not solve.
    pub fn frac_missed(&self) -> f32 {
        if self.num_tried == 0 {
            return 0.;
        }
        (self.num_missed() as f32) / (self.num_tried as f32)
    }

    /// How many puzzles were solved on each turn, starting with turn one.
    pub fn histogram(&self) -> &[u32; MAX_GUESSES] {
        &self.histogram
    }

    /// Prints the summary to stdout.
    pub fn print(&self) -> Result<(), WordleError> {
        let mut stdout = std::io::stdout();
        self.write_to(&mut stdout)
    }

    /// Writes the summary, with a histogram of solve turns, to `out`.
    pub fn write_to(&self, out: &mut impl Write) -> Result<(), WordleError> {
        writeln!(out, "{:-^80}", " wordle_cheat ")?;
        writeln!(out, "Ran {} words", self.num_tried())?;

        let missed = self.num_missed();
        writeln!(
            out,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            missed.if_supports_color(Stream::Stdout, |text| {
                if missed > 0 {
                    text.color(AnsiColors::Red)
                } else {
                    text.color(AnsiColors::Green)
                }
            })
        )?;

        if self.num_solved > 0 {
            writeln!(
                out,
                "Correct guesses took {:.2} attempts on average",
                self.mean_guesses(),
            )?;
        }

        for (i, &count) in self.histogram.iter().enumerate() {
            let frac = if self.num_tried == 0 {
                0.
            } else {
                count as f64 / self.num_tried as f64
            };
            let width = (30.0 * frac).round() as usize;
            writeln!(
                out,
                "{:>2}: {:<30} ({})",
                i + 1,
                "#".repeat(width),
                count
            )?;
        }

        Ok(())
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Ran {} words, solved {} ({:.1}%), missed {}",
            self.num_tried,
            self.num_solved,
            self.frac_solved() * 100.,
            self.num_missed()
        )?;
        if self.num_solved > 0 {
            write!(f, "Solved puzzles took {:.2} guesses on average", self.mean_guesses())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn attempts(words: &[&str]) -> Attempts {
        let mut attempts = Attempts::new();
        for w in words {
            attempts.push(word(w)).unwrap();
        }
        attempts
    }

    fn perf() -> Perf {
        Perf::new(
            vec![
                Try {
                    answer: word("apple"),
                    outcome: Outcome::Solved {
                        answer: word("apple"),
                        turns: 3,
                    },
                    attempts: attempts(&["crane", "apply", "apple"]),
                },
                Try {
                    answer: word("brown"),
                    outcome: Outcome::Solved {
                        answer: word("brown"),
                        turns: 1,
                    },
                    attempts: attempts(&["brown"]),
                },
                Try {
                    answer: word("fuzzy"),
                    outcome: Outcome::Exhausted { remaining: 2 },
                    attempts: attempts(&["crane", "doing", "lumpy", "jumpy", "gummy", "buggy"]),
                },
            ],
            0,
        )
    }

    #[test]
    fn counts() {
        let perf = perf();
        assert_eq!(perf.num_tried(), 3);
        assert_eq!(perf.num_solved(), 2);
        assert_eq!(perf.num_missed(), 1);
        assert_eq!(perf.cumulative_guesses(), 10);
    }

    #[test]
    fn summary_statistics() {
        let summary = perf().to_summary();
        assert_eq!(summary.histogram(), &[1, 0, 1, 0, 0, 0]);
        assert_eq!(summary.cumulative_guesses_solved(), 4);
        assert!((summary.mean_guesses() - 2.0).abs() < f32::EPSILON);
        assert!((summary.frac_missed() - 1. / 3.).abs() < 1e-6);
    }

    #[test]
    fn summary_writes_histogram() {
        let mut out = Vec::new();
        perf().to_summary().write_to(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Ran 3 words"));
        assert!(printed.contains("2.00 attempts on average"));
        assert_eq!(printed.lines().filter(|l| l.contains(": ")).count(), 6);
    }

    #[test]
    fn no_games_reports_zeroes() {
        let summary = Perf::new(Vec::new(), 0).to_summary();
        assert_eq!(summary.frac_solved(), 0.);
        assert_eq!(summary.frac_missed(), 0.);
        assert_eq!(summary.mean_guesses(), 0.);

        let shown = summary.to_string();
        assert!(shown.contains("(0.0%)"));
        assert!(!shown.contains("NaN"));

        let mut out = Vec::new();
        summary.write_to(&mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("NaN"));
    }
}
