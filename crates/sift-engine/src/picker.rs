//! Equivalence class representatives
//!
//! Elements are grouped by key. Within a class a caller-supplied pairwise
//! `pick(challenger, current)` decides which member survives; it only has to
//! be consistent pair by pair, not a total order. The survivors are emitted
//! sorted by their original index, so output order follows whichever member
//! won each class rather than its first occurrence.

use std::convert::Infallible;
use std::fmt;

use sift_core::{infallible, Element, SiftError, SiftResult, Visit, Visited};
use tracing::trace;

use crate::take_survivors;

/// An element paired with its original index.
///
/// Only this module creates representatives, so a pick function can only
/// return one of the two it was given.
pub struct Representative<'a, T> {
    index: usize,
    item: &'a T,
}

impl<'a, T> Representative<'a, T> {
    fn new(index: usize, item: &'a T) -> Self {
        Representative { index, item }
    }

    /// Position in the input sequence
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn item(&self) -> &'a T {
        self.item
    }
}

impl<T> Clone for Representative<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Representative<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Representative<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Representative({}, {:?})", self.index, self.item)
    }
}

/// Picks one representative per equivalence class
#[derive(Clone, Copy, Debug, Default)]
pub struct EquivalenceClassPicker;

impl EquivalenceClassPicker {
    pub fn new() -> Self {
        EquivalenceClassPicker
    }

    pub fn run<T, K, I, F, P>(&self, seq: I, mut key_fn: F, mut pick: P) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        K: Element,
        F: FnMut(&T) -> K,
        P: for<'a> FnMut(Representative<'a, T>, Representative<'a, T>) -> Representative<'a, T>,
    {
        infallible(self.try_run(
            seq,
            |item: &T| Ok::<K, Infallible>(key_fn(item)),
            |challenger, current| Ok(pick(challenger, current)),
        ))
    }

    /// Fallible form of [`EquivalenceClassPicker::run`].
    ///
    /// Key errors carry the index of the element being keyed, pick errors
    /// the index of the challenger.
    pub fn try_run<T, K, E, I, F, P>(
        &self,
        seq: I,
        mut key_fn: F,
        mut pick: P,
    ) -> SiftResult<Vec<T>, E>
    where
        I: IntoIterator<Item = T>,
        K: Element,
        F: FnMut(&T) -> Result<K, E>,
        P: for<'a> FnMut(
            Representative<'a, T>,
            Representative<'a, T>,
        ) -> Result<Representative<'a, T>, E>,
    {
        let items: Vec<T> = seq.into_iter().collect();
        let mut keys = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match key_fn(item) {
                Ok(key) => keys.push(key),
                Err(cause) => return Err(SiftError::Key { index, cause }),
            }
        }

        let mut visited = Visited::with_capacity(keys.len());
        // Winning index per class slot
        let mut winners: Vec<usize> = Vec::new();

        for (index, key) in keys.iter().enumerate() {
            let slot = match visited.visit(index, key) {
                Visit::New(_) => {
                    winners.push(index);
                    continue;
                }
                Visit::Seen(slot) => slot,
            };

            let current = winners[slot];
            let chosen = pick(
                Representative::new(index, &items[index]),
                Representative::new(current, &items[current]),
            )
            .map_err(|cause| SiftError::Pick { index, cause })?;
            winners[slot] = chosen.index;
        }

        // Each index belongs to exactly one class
        winners.sort_unstable();
        trace!(
            input = items.len(),
            classes = winners.len(),
            "representatives picked"
        );
        Ok(take_survivors(items, &winners))
    }
}

/// Keep the best member of each key class, ordered by the winner's index.
///
/// `pick` is called as `pick(challenger, current_best)` and returns the one
/// that should survive.
///
/// ```rust
/// use sift_engine::dedup_by_representative;
///
/// let words = vec!["a", "1", "bb", "aaa", "b"];
/// let out = dedup_by_representative(
///     words,
///     |w| w.chars().next(),
///     |challenger, current| {
///         if current.item().len() > challenger.item().len() {
///             current
///         } else {
///             challenger
///         }
///     },
/// );
/// assert_eq!(out, vec!["1", "bb", "aaa"]);
/// ```
pub fn dedup_by_representative<T, K, I, F, P>(seq: I, key_fn: F, pick: P) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Element,
    F: FnMut(&T) -> K,
    P: for<'a> FnMut(Representative<'a, T>, Representative<'a, T>) -> Representative<'a, T>,
{
    EquivalenceClassPicker::new().run(seq, key_fn, pick)
}

/// Fallible form of [`dedup_by_representative`]
pub fn try_dedup_by_representative<T, K, E, I, F, P>(
    seq: I,
    key_fn: F,
    pick: P,
) -> SiftResult<Vec<T>, E>
where
    I: IntoIterator<Item = T>,
    K: Element,
    F: FnMut(&T) -> Result<K, E>,
    P: for<'a> FnMut(
        Representative<'a, T>,
        Representative<'a, T>,
    ) -> Result<Representative<'a, T>, E>,
{
    EquivalenceClassPicker::new().try_run(seq, key_fn, pick)
}
