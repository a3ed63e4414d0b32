#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod word;
pub use word::{LetterSet, Word};

pub mod words;
pub use words::Wordlist;

pub mod feedback;
pub use feedback::{Feedback, FeedbackRule, Grade, Slot};

pub mod filter;

pub mod opening;
pub use opening::{Opening, OpeningHeuristic};

pub mod hint;
pub use hint::{HintSource, LocalHints, Observation, Settled, TranscribedHints};

pub mod solver;
pub use solver::{Attempts, Outcome, Phase, Solver, Turn, MAX_GUESSES};

#[cfg(feature = "bench")]
pub mod harness;
#[cfg(feature = "bench")]
pub use harness::Harness;

#[cfg(feature = "bench")]
pub mod perf;
#[cfg(feature = "bench")]
pub use perf::{Perf, Summary};

/// Shorthand for results produced by this crate.
pub type Result<T, E = WordleError> = std::result::Result<T, E>;

/// The errors that `wordle_cheat` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("invalid word")]
    Word {
        #[from]
        kind: WordError,
    },

    #[error("the hint source failed")]
    Hint {
        #[from]
        kind: HintError,
    },

    /// A line of the wordlist could not be turned into a [`Word`].
    #[error("line {line} of the wordlist is not a valid word")]
    InvalidLine {
        line: usize,
        #[source]
        source: WordError,
    },

    /// The wordlist holds no words to draw an answer from.
    #[error("the wordlist has no words")]
    EmptyWordlist,

    #[error("general IO error")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    /// The string does not have exactly five letters.
    #[error("\"{word}\" has {len} characters, expected 5")]
    InvalidLength { word: String, len: usize },

    /// The string contains something outside `a-z`.
    #[error("\"{word}\" contains '{letter}', which is not a latin letter")]
    InvalidLetter { word: String, letter: char },
}

#[derive(Debug, Error)]
pub enum HintError {
    /// The hint source stopped responding or produced nothing usable.
    #[error("the hint source is unavailable: {0}")]
    Unavailable(String),

    #[error("could not talk to the hint source")]
    Io(#[from] std::io::Error),
}
