//! Deduplication strategies
//!
//! Each strategy reports the indices of the surviving elements rather than
//! the elements themselves, so the input is only moved once the whole run
//! has succeeded:
//! - Hash: O(n), needs hashable elements, order incidental
//! - Order: O(n log n), needs a total order, output in ascending order
//! - Linear: O(n²), equality only, first-seen order

use std::fmt;

use sift_core::{Capability, CapabilityResult, Element, HashedSet, LinearSet, Membership};

use crate::sort::try_sort_by;

/// Strategy identifier, in cascade order from cheapest to most general
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Strategy {
    Hash = 0,
    Order = 1,
    Linear = 2,
}

impl Strategy {
    pub fn all() -> &'static [Strategy] {
        &[Strategy::Hash, Strategy::Order, Strategy::Linear]
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Hash => "hash",
            Strategy::Order => "order",
            Strategy::Linear => "linear",
        }
    }

    /// Can this strategy run on a type declaring `capability`?
    pub fn supported_by(self, capability: Capability) -> bool {
        match self {
            Strategy::Hash => capability.is_hashable(),
            Strategy::Order => capability.is_ordered(),
            Strategy::Linear => true,
        }
    }

    /// Does the output keep first-seen input order?
    pub fn preserves_order(self) -> bool {
        match self {
            // Incidental: buckets are walked in input order today
            Strategy::Hash => true,
            Strategy::Order => false,
            Strategy::Linear => true,
        }
    }

    /// Run this strategy over `items`
    pub fn survivors<T: Element>(self, items: &[T]) -> CapabilityResult<Vec<usize>> {
        match self {
            Strategy::Hash => HashDeduper.survivors(items),
            Strategy::Order => OrderDeduper.survivors(items),
            Strategy::Linear => Ok(LinearDeduper.retain_first(items)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A deduplication algorithm
pub trait Deduper {
    const STRATEGY: Strategy;

    /// Indices of the elements to keep, in output order
    fn survivors<T: Element>(&self, items: &[T]) -> CapabilityResult<Vec<usize>>;

    /// Deduplicate `items`, moving the survivors out
    fn dedup<T: Element>(&self, items: Vec<T>) -> CapabilityResult<Vec<T>> {
        let survivors = self.survivors(&items)?;
        Ok(take_survivors(items, &survivors))
    }
}

/// O(n) deduplication through hash buckets
#[derive(Clone, Copy, Debug, Default)]
pub struct HashDeduper;

impl Deduper for HashDeduper {
    const STRATEGY: Strategy = Strategy::Hash;

    fn survivors<T: Element>(&self, items: &[T]) -> CapabilityResult<Vec<usize>> {
        let mut seen = HashedSet::with_capacity(items.len());
        let mut survivors = Vec::new();

        for (index, item) in items.iter().enumerate() {
            if seen.visit(item)?.is_new() {
                survivors.push(index);
            }
        }

        Ok(survivors)
    }
}

/// O(n log n) deduplication by sorting then dropping adjacent repeats
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderDeduper;

impl Deduper for OrderDeduper {
    const STRATEGY: Strategy = Strategy::Order;

    fn survivors<T: Element>(&self, items: &[T]) -> CapabilityResult<Vec<usize>> {
        // Sort positions, not elements: `items` is never touched
        let mut order: Vec<usize> = (0..items.len()).collect();
        try_sort_by(&mut order, |&a, &b| items[a].try_cmp(&items[b]))?;

        let mut survivors: Vec<usize> = Vec::with_capacity(order.len());
        for index in order {
            let repeat = survivors
                .last()
                .is_some_and(|&kept| items[kept] == items[index]);
            if !repeat {
                survivors.push(index);
            }
        }

        Ok(survivors)
    }
}

/// O(n²) deduplication by linear scan, equality only
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearDeduper;

impl LinearDeduper {
    /// Infallible form of [`Deduper::survivors`]
    pub fn retain_first<T: PartialEq>(&self, items: &[T]) -> Vec<usize> {
        let mut seen = LinearSet::new();
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| seen.visit_key(*item).is_new())
            .map(|(index, _)| index)
            .collect()
    }
}

impl Deduper for LinearDeduper {
    const STRATEGY: Strategy = Strategy::Linear;

    fn survivors<T: Element>(&self, items: &[T]) -> CapabilityResult<Vec<usize>> {
        Ok(self.retain_first(items))
    }
}

/// Move the elements at `survivors` out of `items`, in `survivors` order.
///
/// Indices must be distinct; a repeated index is skipped.
pub fn take_survivors<T>(items: Vec<T>, survivors: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    survivors
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}
