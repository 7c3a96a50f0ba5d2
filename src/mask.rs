//! Feedback mask generation
//!
//! A mask assigns one [`Feedback`] to every character of a guess. The caller
//! supplies how many characters are correctly placed and how many are
//! misplaced; the mask builder lays those categories out in order and then
//! shuffles them so the player cannot infer which letters they are.
//!
//! # Example
//! ```
//! use motus_rust::mask::{build_mask, Feedback};
//!
//! let mask = build_mask("abc", 1, 1).unwrap();
//! assert_eq!(mask.len(), 3);
//! assert_eq!(mask.count(Feedback::Correct), 1);
//! assert_eq!(mask.count(Feedback::Misplaced), 1);
//! assert_eq!(mask.count(Feedback::Absent), 1);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MotusError, Result};

/// Feedback category for a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter is in the word at this position
    Correct,
    /// Letter is in the word at another position
    Misplaced,
    /// Letter is not in the word
    Absent,
}

/// Per-character feedback, indexed like the characters of the text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mask {
    cells: Vec<Feedback>,
}

impl Mask {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Feedback> {
        self.cells.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feedback> + '_ {
        self.cells.iter().copied()
    }

    /// Number of cells carrying `feedback`
    pub fn count(&self, feedback: Feedback) -> usize {
        self.cells.iter().filter(|&&f| f == feedback).count()
    }
}

impl From<Vec<Feedback>> for Mask {
    fn from(cells: Vec<Feedback>) -> Self {
        Self { cells }
    }
}

/// Build a shuffled mask for `text` using the thread-local RNG.
///
/// Negative counts are treated as zero. Fails with
/// [`MotusError::InvalidArgument`] if the counts exceed the number of
/// characters in `text`.
pub fn build_mask(text: &str, ok_count: i64, misplaced_count: i64) -> Result<Mask> {
    build_mask_with_rng(text, ok_count, misplaced_count, &mut rand::thread_rng())
}

/// Same as [`build_mask`] with an explicit random source
pub fn build_mask_with_rng<R: Rng + ?Sized>(
    text: &str,
    ok_count: i64,
    misplaced_count: i64,
    rng: &mut R,
) -> Result<Mask> {
    let len = text.chars().count();
    let ok = clamp_count(ok_count);
    let misplaced = clamp_count(misplaced_count);

    if len == 0 {
        return Ok(Mask::default());
    }

    if ok.saturating_add(misplaced) > len {
        return Err(MotusError::InvalidArgument { ok, misplaced, len });
    }

    let mut cells: Vec<Feedback> = (0..len)
        .map(|i| {
            if i < ok {
                Feedback::Correct
            } else if i < ok + misplaced {
                Feedback::Misplaced
            } else {
                Feedback::Absent
            }
        })
        .collect();

    cells.shuffle(rng);

    tracing::debug!("mask for {} chars: {} ok, {} misplaced", len, ok, misplaced);

    Ok(Mask { cells })
}

fn clamp_count(count: i64) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}
