//! Narrowing a candidate pool with feedback.
//!
//! Every function here is pure: it borrows a pool and returns the words that
//! survive as a new [`Vec`]. The sub-filters are set intersections, so the
//! order they run in only matters for speed. [`narrow()`] runs the absence
//! filter first since it usually removes the most words.

use crate::{
    feedback::{Feedback, Slot},
    word::{LetterSet, Word, WORD_LEN},
};

/// Keeps the words that contain none of the `absent` letters.
pub fn without_absent(pool: &[Word], absent: LetterSet) -> Vec<Word> {
    pool.iter()
        .filter(|w| w.letter_set().is_disjoint(&absent))
        .copied()
        .collect()
}

/// Keeps the words that contain every one of the `present` letters.
pub fn with_present(pool: &[Word], present: LetterSet) -> Vec<Word> {
    pool.iter()
        .filter(|w| present.is_subset(&w.letter_set()))
        .copied()
        .collect()
}

/// Keeps the words that hold the confirmed letter at every confirmed
/// position.
pub fn matching_positions(pool: &[Word], positions: &[Slot; WORD_LEN]) -> Vec<Word> {
    pool.iter()
        .filter(|w| {
            positions
                .iter()
                .zip(w.letters())
                .all(|(slot, &c)| match slot {
                    Slot::Confirmed(k) => *k == c,
                    Slot::Unconfirmed => true,
                })
        })
        .copied()
        .collect()
}

/// Applies all three filters for one piece of feedback.
///
/// The result may be empty, which means no word in the pool is consistent
/// with the feedback.
pub fn narrow(pool: &[Word], feedback: &Feedback) -> Vec<Word> {
    let pool = without_absent(pool, feedback.absent());
    let pool = with_present(&pool, feedback.present());
    matching_positions(&pool, feedback.positions())
}
