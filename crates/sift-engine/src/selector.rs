//! Strategy selection
//!
//! The selector walks a cascade of strategies from cheapest to most general.
//! The element type's declared capability is read once per call:
//! 1. Strategies the type cannot support are skipped without running
//! 2. A strategy that hits a runtime capability failure falls through
//! 3. Linear always closes the cascade and cannot fail
//!
//! Fallthroughs are recorded in the returned [`Dedup`] report and logged,
//! never returned as errors.

use sift_core::{Capability, CapabilityError, Element};
use tracing::{debug, trace};

use crate::{take_survivors, LinearDeduper, Strategy};

/// Selector configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Strategies to attempt, in order. Anything after `Linear` is ignored
    /// and `Linear` is appended when missing.
    pub cascade: Vec<Strategy>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            cascade: vec![Strategy::Hash, Strategy::Order, Strategy::Linear],
        }
    }
}

impl SelectorConfig {
    /// Never reorder: skip the sorting strategy
    pub fn stable() -> Self {
        SelectorConfig {
            cascade: vec![Strategy::Hash, Strategy::Linear],
        }
    }

    /// Equality scan only
    pub fn linear_only() -> Self {
        SelectorConfig {
            cascade: vec![Strategy::Linear],
        }
    }
}

/// Why a strategy in the cascade did not produce the output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// Skipped: the element type does not declare the capability
    Unsupported(Capability),
    /// Attempted and failed at runtime
    Failed(CapabilityError),
}

/// A strategy that was passed over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fallback {
    pub strategy: Strategy,
    pub reason: FallbackReason,
}

/// Deduplication report
#[derive(Clone, Debug, PartialEq)]
pub struct Dedup<T> {
    /// Surviving elements
    pub items: Vec<T>,
    /// Strategy that produced `items`
    pub strategy: Strategy,
    /// Strategies passed over before `strategy`, in cascade order
    pub fallbacks: Vec<Fallback>,
}

impl<T> Dedup<T> {
    /// Does `items` keep first-seen input order?
    pub fn is_stable(&self) -> bool {
        self.strategy.preserves_order()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Cascading strategy selector
#[derive(Clone, Debug)]
pub struct StrategySelector {
    /// Always ends with `Linear`
    cascade: Vec<Strategy>,
}

impl StrategySelector {
    pub fn new() -> Self {
        Self::with_config(SelectorConfig::default())
    }

    pub fn with_config(config: SelectorConfig) -> Self {
        let mut cascade = Vec::with_capacity(Strategy::all().len());
        for strategy in config.cascade {
            if strategy == Strategy::Linear {
                break;
            }
            if !cascade.contains(&strategy) {
                cascade.push(strategy);
            }
        }
        cascade.push(Strategy::Linear);

        StrategySelector { cascade }
    }

    /// Effective cascade
    pub fn cascade(&self) -> &[Strategy] {
        &self.cascade
    }

    /// Deduplicate `seq`, reporting which strategy ran
    pub fn run<T, I>(&self, seq: I) -> Dedup<T>
    where
        T: Element,
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = seq.into_iter().collect();
        let capability = Capability::of::<T>();
        let mut fallbacks = Vec::new();

        let (last, attempts) = self
            .cascade
            .split_last()
            .unwrap_or((&Strategy::Linear, &[]));
        debug_assert_eq!(*last, Strategy::Linear);

        for &strategy in attempts {
            if !strategy.supported_by(capability) {
                debug!(%strategy, %capability, len = items.len(), "strategy unsupported, skipping");
                fallbacks.push(Fallback {
                    strategy,
                    reason: FallbackReason::Unsupported(capability),
                });
                continue;
            }

            match strategy.survivors(&items) {
                Ok(survivors) => return Self::finish(items, &survivors, strategy, fallbacks),
                Err(err) => {
                    debug!(
                        %strategy,
                        reason = %err,
                        len = items.len(),
                        "strategy failed, falling through"
                    );
                    fallbacks.push(Fallback {
                        strategy,
                        reason: FallbackReason::Failed(err),
                    });
                }
            }
        }

        let survivors = LinearDeduper.retain_first(&items);
        Self::finish(items, &survivors, Strategy::Linear, fallbacks)
    }

    fn finish<T>(
        items: Vec<T>,
        survivors: &[usize],
        strategy: Strategy,
        fallbacks: Vec<Fallback>,
    ) -> Dedup<T> {
        trace!(%strategy, input = items.len(), output = survivors.len(), "dedup complete");
        Dedup {
            items: take_survivors(items, survivors),
            strategy,
            fallbacks,
        }
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicate `seq` with the cheapest strategy the elements support.
///
/// Order of the output is unspecified.
///
/// ```rust
/// use sift_engine::dedup;
///
/// let mut out = dedup(vec![4, 4, 1, 2, 3, 1, 2, 3]);
/// out.sort();
/// assert_eq!(out, vec![1, 2, 3, 4]);
/// ```
pub fn dedup<T, I>(seq: I) -> Vec<T>
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    StrategySelector::new().run(seq).into_items()
}
