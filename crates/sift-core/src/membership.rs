//! Membership structures
//!
//! A membership structure records which equivalence classes have been seen.
//! Each new class gets a dense slot number (0, 1, 2, ...) in insertion order,
//! so callers can keep per-class data in a plain `Vec` beside it.
//!
//! Two backings share the [`Membership`] interface:
//! - [`HashedSet`]: hash buckets resolved by equality, O(1) probe, needs hashable keys
//! - [`LinearSet`]: linear equality scan, O(n) probe, never fails
//!
//! [`Visited`] starts hashed when the key type declares hashability and
//! degrades to a [`LinearSet`] the first time a key refuses to hash.

use std::hash::{BuildHasher, Hasher};

use ahash::{AHashMap, RandomState};
use tracing::debug;

use crate::{CapabilityResult, Element};

/// Outcome of visiting a key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visit {
    /// First key of a new class, stored at this slot
    New(usize),
    /// Key belongs to the class already stored at this slot
    Seen(usize),
}

impl Visit {
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Visit::New(slot) | Visit::Seen(slot) => slot,
        }
    }

    #[inline]
    pub fn is_new(self) -> bool {
        matches!(self, Visit::New(_))
    }
}

/// Uniform membership interface over borrowed keys
pub trait Membership<'a, K: 'a> {
    /// Slot of the class `key` belongs to, if seen
    fn probe(&self, key: &K) -> CapabilityResult<Option<usize>>;

    /// Record `key` as a new class and return its slot.
    ///
    /// Does not check for an existing class; use [`Membership::visit`] for that.
    fn insert(&mut self, key: &'a K) -> CapabilityResult<usize>;

    /// Number of classes recorded
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Probe, inserting `key` when it is not present
    fn visit(&mut self, key: &'a K) -> CapabilityResult<Visit> {
        match self.probe(key)? {
            Some(slot) => Ok(Visit::Seen(slot)),
            None => self.insert(key).map(Visit::New),
        }
    }
}

/// Equality-only membership by linear scan
#[derive(Clone, Debug)]
pub struct LinearSet<'a, K> {
    keys: Vec<&'a K>,
}

impl<'a, K: PartialEq> LinearSet<'a, K> {
    pub fn new() -> Self {
        LinearSet { keys: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinearSet {
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Slot of `key`, if present
    pub fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|&seen| seen == key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Infallible visit
    pub fn visit_key(&mut self, key: &'a K) -> Visit {
        match self.position(key) {
            Some(slot) => Visit::Seen(slot),
            None => {
                self.keys.push(key);
                Visit::New(self.keys.len() - 1)
            }
        }
    }

    /// Keys in slot order
    pub fn keys(&self) -> &[&'a K] {
        &self.keys
    }
}

impl<'a, K: PartialEq> Default for LinearSet<'a, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: PartialEq> Membership<'a, K> for LinearSet<'a, K> {
    fn probe(&self, key: &K) -> CapabilityResult<Option<usize>> {
        Ok(self.position(key))
    }

    fn insert(&mut self, key: &'a K) -> CapabilityResult<usize> {
        self.keys.push(key);
        Ok(self.keys.len() - 1)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn visit(&mut self, key: &'a K) -> CapabilityResult<Visit> {
        Ok(self.visit_key(key))
    }
}

/// Hash-bucketed membership.
///
/// Buckets hold slots; a probe hashes the key once and compares it by
/// equality against the keys in its bucket, so collisions never merge
/// distinct classes.
#[derive(Clone, Debug)]
pub struct HashedSet<'a, K> {
    state: RandomState,
    buckets: AHashMap<u64, Vec<usize>>,
    keys: Vec<&'a K>,
}

impl<'a, K: Element> HashedSet<'a, K> {
    pub fn new() -> Self {
        HashedSet {
            state: RandomState::new(),
            buckets: AHashMap::new(),
            keys: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HashedSet {
            state: RandomState::new(),
            buckets: AHashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
        }
    }

    fn hash_of(&self, key: &K) -> CapabilityResult<u64> {
        let mut hasher = self.state.build_hasher();
        key.try_hash(&mut hasher)?;
        Ok(hasher.finish())
    }

    /// Keys in slot order
    pub fn keys(&self) -> &[&'a K] {
        &self.keys
    }

    /// Move every recorded key into a linear set, keeping slot numbers
    pub fn into_linear(self) -> LinearSet<'a, K> {
        LinearSet { keys: self.keys }
    }
}

impl<'a, K: Element> Default for HashedSet<'a, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Element> Membership<'a, K> for HashedSet<'a, K> {
    fn probe(&self, key: &K) -> CapabilityResult<Option<usize>> {
        let hash = self.hash_of(key)?;
        Ok(self.buckets.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|&slot| self.keys[slot] == key)
        }))
    }

    fn insert(&mut self, key: &'a K) -> CapabilityResult<usize> {
        let hash = self.hash_of(key)?;
        let slot = self.keys.len();
        self.keys.push(key);
        self.buckets.entry(hash).or_default().push(slot);
        Ok(slot)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    // Hashes once instead of once per probe and insert
    fn visit(&mut self, key: &'a K) -> CapabilityResult<Visit> {
        let hash = self.hash_of(key)?;
        let keys = &mut self.keys;
        let bucket = self.buckets.entry(hash).or_default();

        if let Some(slot) = bucket.iter().copied().find(|&slot| keys[slot] == key) {
            return Ok(Visit::Seen(slot));
        }

        let slot = keys.len();
        keys.push(key);
        bucket.push(slot);
        Ok(Visit::New(slot))
    }
}

/// Visited structure over keys: hashed fast path, linear fallback
#[derive(Clone, Debug)]
pub enum Visited<'a, K> {
    Hashed(HashedSet<'a, K>),
    Linear(LinearSet<'a, K>),
}

impl<'a, K: Element> Visited<'a, K> {
    /// Pick the backing from the key type's declared capability
    pub fn new() -> Self {
        if K::CAPABILITY.is_hashable() {
            Visited::Hashed(HashedSet::new())
        } else {
            Visited::Linear(LinearSet::new())
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        if K::CAPABILITY.is_hashable() {
            Visited::Hashed(HashedSet::with_capacity(capacity))
        } else {
            Visited::Linear(LinearSet::with_capacity(capacity))
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Visited::Linear(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Visited::Hashed(set) => set.len(),
            Visited::Linear(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit `key`, degrading to linear scan if it cannot be hashed.
    ///
    /// `index` is the position of the element the key came from; it is only
    /// used for diagnostics. Never fails.
    pub fn visit(&mut self, index: usize, key: &'a K) -> Visit {
        let set = match self {
            Visited::Linear(set) => return set.visit_key(key),
            Visited::Hashed(set) => set,
        };

        match set.visit(key) {
            Ok(visit) => visit,
            Err(err) => {
                debug!(
                    index,
                    keys = set.len(),
                    reason = %err,
                    "degrading visited set to linear scan"
                );
                let mut linear = std::mem::take(set).into_linear();
                let visit = linear.visit_key(key);
                *self = Visited::Linear(linear);
                visit
            }
        }
    }
}

impl<'a, K: Element> Default for Visited<'a, K> {
    fn default() -> Self {
        Self::new()
    }
}
