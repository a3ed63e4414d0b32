//! Five-letter words and sets of letters.

use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::WordError;

/// The number of letters in every word.
pub const WORD_LEN: usize = 5;

/// A Wordle word.
///
/// Construction validates that the word has exactly five letters, all from
/// the latin alphabet. Uppercase letters are folded to lowercase, so every
/// instance holds `a-z` only.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct Word {
    letters: [u8; WORD_LEN],
}

impl Word {
    /// Creates a new [`Word`] from a five letter string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wordle_cheat::Word;
    /// let crane = Word::new("CRANE")?;
    /// assert_eq!(&*crane, "crane");
    ///
    /// assert!(Word::new("cranes").is_err());
    /// assert!(Word::new("cr4ne").is_err());
    /// #
    /// # Ok::<_, wordle_cheat::WordError>(())
    /// ```
    pub fn new(word: &str) -> Result<Self, WordError> {
        let len = word.chars().count();
        if len != WORD_LEN {
            return Err(WordError::InvalidLength {
                word: word.to_string(),
                len,
            });
        }

        let mut letters = [0_u8; WORD_LEN];
        for (slot, c) in letters.iter_mut().zip(word.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::InvalidLetter {
                    word: word.to_string(),
                    letter: c,
                });
            }
            *slot = c.to_ascii_lowercase() as u8;
        }

        Ok(Word { letters })
    }

    /// The letters of the word as ascii bytes.
    pub fn letters(&self) -> &[u8; WORD_LEN] {
        &self.letters
    }

    /// The letter at `index`.
    pub fn letter(&self, index: usize) -> u8 {
        self.letters[index]
    }

    /// Returns true if `letter` occurs anywhere in the word.
    pub fn has(&self, letter: u8) -> bool {
        self.letters.contains(&letter)
    }

    /// The distinct letters of the word.
    pub fn letter_set(&self) -> LetterSet {
        self.letters.iter().copied().collect()
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        // construction only ever stores ascii lowercase letters
        std::str::from_utf8(&self.letters).unwrap_or_default()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Word::new(s)
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::new(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.deref().to_string()
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.deref())
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.deref())
    }
}

/// A set of lowercase latin letters, stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LetterSet {
    bits: u32,
}

impl LetterSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a string of letters.
    ///
    /// Uppercase letters are folded to lowercase. Returns an error for
    /// anything outside the latin alphabet.
    pub fn parse(letters: &str) -> Result<Self, WordError> {
        let mut set = LetterSet::new();
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::InvalidLetter {
                    word: letters.to_string(),
                    letter: c,
                });
            }
            set.insert(c.to_ascii_lowercase() as u8);
        }
        Ok(set)
    }

    /// Bytes outside `a-z` map to an empty mask.
    fn mask(letter: u8) -> u32 {
        if letter.is_ascii_lowercase() {
            1 << (letter - b'a')
        } else {
            0
        }
    }

    pub fn insert(&mut self, letter: u8) {
        self.bits |= Self::mask(letter);
    }

    pub fn remove(&mut self, letter: u8) {
        self.bits &= !Self::mask(letter);
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.bits & Self::mask(letter) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn union(self, other: LetterSet) -> LetterSet {
        LetterSet {
            bits: self.bits | other.bits,
        }
    }

    pub fn intersection(self, other: LetterSet) -> LetterSet {
        LetterSet {
            bits: self.bits & other.bits,
        }
    }

    pub fn difference(self, other: LetterSet) -> LetterSet {
        LetterSet {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns true if every letter of `self` is also in `other`.
    pub fn is_subset(&self, other: &LetterSet) -> bool {
        self.bits & !other.bits == 0
    }

    pub fn is_disjoint(&self, other: &LetterSet) -> bool {
        self.bits & other.bits == 0
    }

    /// Iterates over the letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (b'a'..=b'z').filter(move |&c| self.contains(c))
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = LetterSet::new();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl Display for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c as char)?;
        }
        write!(f, "}}")
    }
}

impl Debug for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
