//! Loading the dictionary that seeds every candidate pool.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::Deref,
    path::Path,
};

use itertools::Itertools;

use crate::{Result, Word, WordleError};

/// A deduplicated list of dictionary words, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Wordlist {
    words: Vec<Word>,
}

impl Wordlist {
    /// Builds a wordlist from words that have already been validated.
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        Wordlist {
            words: words.into_iter().unique().collect(),
        }
    }

    /// Reads a newline-delimited wordlist.
    ///
    /// Trailing whitespace on each line is trimmed and blank lines are
    /// skipped. Any other line that is not a five letter word fails the whole
    /// load, with its 1-based line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use wordle_cheat::Wordlist;
    /// let list = Wordlist::from_reader("crane\napple  \n\ncrane\n".as_bytes())?;
    /// assert_eq!(list.len(), 2);
    ///
    /// assert!(Wordlist::from_reader("crane\nbanana\n".as_bytes()).is_err());
    /// #
    /// # Ok::<_, wordle_cheat::WordleError>(())
    /// ```
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut words = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            let word = Word::new(trimmed)
                .map_err(|source| WordleError::InvalidLine { line: i + 1, source })?;
            words.push(word);
        }

        let list = Self::new(words);
        log::debug!("loaded {} words", list.len());
        Ok(list)
    }

    /// Reads a wordlist from a file. See [`from_reader()`](Self::from_reader()).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Returns a fresh candidate pool holding every word.
    pub fn pool(&self) -> Vec<Word> {
        self.words.clone()
    }
}

impl Deref for Wordlist {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trims_and_skips_blank_lines() {
        let list = Wordlist::from_reader("crane \t\n\nbrown\r\n   \napple".as_bytes()).unwrap();
        let words: Vec<&str> = list.iter().map(|w| &**w).collect();
        assert_eq!(words, ["crane", "brown", "apple"]);
    }

    #[test]
    fn drops_duplicates_keeping_first() {
        let list = Wordlist::from_reader("apply\napple\napply\n".as_bytes()).unwrap();
        let words: Vec<&str> = list.iter().map(|w| &**w).collect();
        assert_eq!(words, ["apply", "apple"]);
    }

    #[test]
    fn reports_bad_line_number() {
        let err = Wordlist::from_reader("crane\n\nbr0wn\n".as_bytes()).unwrap_err();
        match err {
            WordleError::InvalidLine { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn leading_whitespace_is_kept() {
        assert!(Wordlist::from_reader(" crane\n".as_bytes()).is_err());
    }

    #[test]
    fn bundled_list_loads() {
        let list = Wordlist::from_reader(include_str!("../words.txt").as_bytes()).unwrap();
        assert!(list.len() > 100);
        assert_eq!(list.pool().len(), list.len());
    }
}
