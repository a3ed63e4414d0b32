//! Picking the first two guesses before any feedback exists.

use rand::{seq::SliceRandom, Rng};

use crate::{
    word::{LetterSet, Word},
    WordError,
};

/// Letters that occur most often in English words, most frequent first.
pub const COMMON_LETTERS: &str = "etaionshr";

/// The two guesses to open a game with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Opening {
    pub first: Word,
    pub second: Word,
}

/// Chooses an opening pair that covers many common letters with little
/// overlap between the two words.
///
/// # Examples
///
/// ```rust
/// # use wordle_cheat::{OpeningHeuristic, Word};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let pool: Vec<Word> = ["fuzzy", "heart", "lumpy", "irate"]
///     .iter()
///     .map(|w| Word::new(w))
///     .collect::<Result<_, _>>()?;
///
/// let opening = OpeningHeuristic::default()
///     .choose(&pool, &mut StdRng::seed_from_u64(7))
///     .unwrap();
/// assert_ne!(opening.first, opening.second);
/// #
/// # Ok::<_, wordle_cheat::WordError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OpeningHeuristic {
    common: LetterSet,
}

impl Default for OpeningHeuristic {
    fn default() -> Self {
        OpeningHeuristic {
            common: COMMON_LETTERS.bytes().collect(),
        }
    }
}

impl OpeningHeuristic {
    /// Creates a heuristic that favors the given letters instead of
    /// [`COMMON_LETTERS`].
    pub fn new(common_letters: &str) -> Result<Self, WordError> {
        Ok(OpeningHeuristic {
            common: LetterSet::parse(common_letters)?,
        })
    }

    pub fn common_letters(&self) -> LetterSet {
        self.common
    }

    /// The number of distinct common letters in `word`.
    pub fn coverage(&self, word: &Word) -> usize {
        word.letter_set().intersection(self.common).len()
    }

    /// Picks the opening pair from `pool`.
    ///
    /// The pool is shuffled first, so ties go to whichever word `rng` puts
    /// first. The first guess has the most distinct common letters. The
    /// second starts from the first other word in shuffled order, and a later
    /// word only replaces it when it shares fewer distinct letters with the
    /// first guess *and* has more common letters.
    ///
    /// Returns `None` for an empty pool. A pool of one word opens with that
    /// word twice.
    pub fn choose<R: Rng + ?Sized>(&self, pool: &[Word], rng: &mut R) -> Option<Opening> {
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(rng);

        let (&head, rest) = shuffled.split_first()?;
        let first = rest.iter().fold(head, |best, word| {
            if self.coverage(word) > self.coverage(&best) {
                *word
            } else {
                best
            }
        });

        let first_letters = first.letter_set();
        let overlap = |w: &Word| w.letter_set().intersection(first_letters).len();

        let mut candidates = shuffled.iter().filter(|w| **w != first);
        let second = match candidates.next() {
            Some(&start) => candidates.fold(start, |best, word| {
                let (new, old) = (overlap(word), overlap(&best));
                if new < old && self.coverage(word) > self.coverage(&best) {
                    *word
                } else {
                    best
                }
            }),
            None => first,
        };

        log::trace!(
            "opening {} (covers {}) then {} (covers {}, shares {})",
            first,
            self.coverage(&first),
            second,
            self.coverage(&second),
            overlap(&second)
        );

        Some(Opening { first, second })
    }
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn pool(words: &[&str]) -> Vec<Word> {
        words.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    #[test]
    fn empty_pool_has_no_opening() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(OpeningHeuristic::default().choose(&[], &mut rng), None);
    }

    #[test]
    fn single_word_opens_twice() {
        let mut rng = StdRng::seed_from_u64(0);
        let words = pool(&["lumpy"]);
        let opening = OpeningHeuristic::default().choose(&words, &mut rng).unwrap();
        assert_eq!(opening.first, words[0]);
        assert_eq!(opening.second, words[0]);
    }

    #[test]
    fn first_guess_covers_most_common_letters() {
        let words = pool(&["fuzzy", "lumpy", "heart", "apple", "jazzy"]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let opening = OpeningHeuristic::default().choose(&words, &mut rng).unwrap();
            assert_eq!(&*opening.first, "heart");
        }
    }

    #[test]
    fn second_guess_avoids_first_letters() {
        // each word sharing fewer letters with `heart` also covers more
        // common letters, so every shuffle walks down to `lions`
        let words = pool(&["heart", "lions", "chips", "thumb"]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let opening = OpeningHeuristic::default().choose(&words, &mut rng).unwrap();
            assert_eq!(&*opening.first, "heart");
            assert_eq!(&*opening.second, "lions");
        }
    }

    #[test]
    fn fewer_shared_letters_alone_does_not_replace() {
        // `doing` shares nothing with `heart` but covers fewer common
        // letters than `tonal`, so whichever of the two comes first stays
        let words = pool(&["heart", "tonal", "doing"]);
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let opening = OpeningHeuristic::default().choose(&words, &mut rng).unwrap();
            assert_eq!(&*opening.first, "heart");
            seen.insert(opening.second);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn ties_follow_shuffle_order() {
        let words = pool(&["heart", "earth", "hater"]);
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let opening = OpeningHeuristic::default().choose(&words, &mut rng).unwrap();
            seen.insert(opening.first);
            assert_ne!(opening.first, opening.second);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn custom_common_letters() {
        let heuristic = OpeningHeuristic::new("zyxU").unwrap();
        assert_eq!(heuristic.coverage(&Word::new("fuzzy").unwrap()), 3);
        assert!(OpeningHeuristic::new("a b").is_err());

        let words = pool(&["heart", "fuzzy", "lumpy"]);
        let mut rng = StdRng::seed_from_u64(3);
        let opening = heuristic.choose(&words, &mut rng).unwrap();
        assert_eq!(&*opening.first, "fuzzy");
        assert_ne!(opening.second, opening.first);
    }

    #[test]
    fn same_seed_same_opening() {
        let words = pool(&["heart", "earth", "hater", "doing", "tonal", "lumpy"]);
        let heuristic = OpeningHeuristic::default();
        let a = heuristic.choose(&words, &mut StdRng::seed_from_u64(11));
        let b = heuristic.choose(&words, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
