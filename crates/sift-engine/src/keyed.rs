//! Keyed deduplication
//!
//! One element survives per distinct key. Which one is a declared policy:
//! - `FirstWins`: the first occurrence, in input order
//! - `LastWins`: the input is walked in reverse with first-wins logic and
//!   the result reversed back, so each survivor is the last occurrence of
//!   its key while survivors keep their original relative order
//!
//! Keys are tracked in a [`Visited`] structure that degrades from hashing to
//! a linear scan when a key cannot be hashed. Key functions are assumed pure
//! for the duration of a call; the last-wins reversal relies on it.

use std::convert::Infallible;

use sift_core::{infallible, Element, SiftError, SiftResult, Visited};
use tracing::trace;

use crate::take_survivors;

/// Which duplicate survives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    #[default]
    FirstWins,
    LastWins,
}

/// Order-preserving deduplication by key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyedDeduper {
    policy: Policy,
}

impl KeyedDeduper {
    pub fn new(policy: Policy) -> Self {
        KeyedDeduper { policy }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Deduplicate `seq` by `key_fn`
    pub fn run<T, K, I, F>(&self, seq: I, mut key_fn: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        K: Element,
        F: FnMut(&T) -> K,
    {
        let result = self.try_run(seq, |item: &T| Ok::<K, Infallible>(key_fn(item)));
        infallible(result)
    }

    /// Deduplicate `seq` by a fallible `key_fn`.
    ///
    /// The first key error is returned with the index of its element.
    pub fn try_run<T, K, E, I, F>(&self, seq: I, mut key_fn: F) -> SiftResult<Vec<T>, E>
    where
        I: IntoIterator<Item = T>,
        K: Element,
        F: FnMut(&T) -> Result<K, E>,
    {
        let items: Vec<T> = seq.into_iter().collect();
        let mut keys = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match key_fn(item) {
                Ok(key) => keys.push(key),
                Err(cause) => return Err(SiftError::Key { index, cause }),
            }
        }

        let survivors = self.survivors(&keys);
        Ok(take_survivors(items, &survivors))
    }

    /// Deduplicate `seq` using the elements themselves as keys
    pub fn run_identity<T, I>(&self, seq: I) -> Vec<T>
    where
        T: Element,
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = seq.into_iter().collect();
        let survivors = self.survivors(&items);
        take_survivors(items, &survivors)
    }

    /// Indices of the surviving keys, in input order
    pub fn survivors<K: Element>(&self, keys: &[K]) -> Vec<usize> {
        let survivors = match self.policy {
            Policy::FirstWins => first_wins(keys.iter().enumerate()),
            Policy::LastWins => {
                let mut survivors = first_wins(keys.iter().enumerate().rev());
                survivors.reverse();
                survivors
            }
        };
        trace!(
            policy = ?self.policy,
            input = keys.len(),
            output = survivors.len(),
            "keyed dedup complete"
        );
        survivors
    }
}

impl Default for KeyedDeduper {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

fn first_wins<'a, K, I>(keys: I) -> Vec<usize>
where
    K: Element + 'a,
    I: ExactSizeIterator<Item = (usize, &'a K)>,
{
    let mut visited = Visited::with_capacity(keys.len());
    keys.filter(|&(index, key)| visited.visit(index, key).is_new())
        .map(|(index, _)| index)
        .collect()
}

/// Deduplicate `seq` by `key_fn`, keeping the occurrence `policy` selects.
///
/// ```rust
/// use sift_engine::{dedup_keyed, Policy};
///
/// let words = vec!["Apple", "apple", "Banana", "APPLE"];
/// let first = dedup_keyed(words.clone(), |w| w.to_lowercase(), Policy::FirstWins);
/// let last = dedup_keyed(words, |w| w.to_lowercase(), Policy::LastWins);
/// assert_eq!(first, vec!["Apple", "Banana"]);
/// assert_eq!(last, vec!["Banana", "APPLE"]);
/// ```
pub fn dedup_keyed<T, K, I, F>(seq: I, key_fn: F, policy: Policy) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Element,
    F: FnMut(&T) -> K,
{
    KeyedDeduper::new(policy).run(seq, key_fn)
}

/// Fallible form of [`dedup_keyed`]
pub fn try_dedup_keyed<T, K, E, I, F>(seq: I, key_fn: F, policy: Policy) -> SiftResult<Vec<T>, E>
where
    I: IntoIterator<Item = T>,
    K: Element,
    F: FnMut(&T) -> Result<K, E>,
{
    KeyedDeduper::new(policy).try_run(seq, key_fn)
}

/// Deduplicate `seq` by the elements themselves, order preserving
pub fn dedup_identity<T, I>(seq: I, policy: Policy) -> Vec<T>
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    KeyedDeduper::new(policy).run_identity(seq)
}
