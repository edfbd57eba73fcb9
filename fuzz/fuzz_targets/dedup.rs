//! Fuzz every deduplication entry point against the output invariants

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sift_core::invariants::{assert_invariant, Invariant};
use sift_core::Unhashable;
use sift_engine::{dedup, dedup_by_representative, dedup_identity, Policy, StrategySelector};

#[derive(Arbitrary, Debug)]
struct Input {
    bytes: Vec<u8>,
    floats: Vec<f32>,
    modulus: u8,
}

fuzz_target!(|input: Input| {
    let bytes = input.bytes;

    let out = dedup(bytes.clone());
    for &invariant in Invariant::unordered() {
        assert_invariant(invariant, &bytes, &out);
    }

    for policy in [Policy::FirstWins, Policy::LastWins] {
        let out = dedup_identity(bytes.clone(), policy);
        for &invariant in Invariant::all() {
            assert_invariant(invariant, &bytes, &out);
        }
    }

    let ordered: Vec<Unhashable<u8>> = bytes.iter().copied().map(Unhashable).collect();
    let report = StrategySelector::new().run(ordered.clone());
    for &invariant in Invariant::unordered() {
        assert_invariant(invariant, &ordered, &report.items);
    }

    // NaN fails the sort and falls through to the equality scan
    let floats = input.floats;
    let report = StrategySelector::new().run(floats.clone());
    assert!(report.items.len() <= floats.len());

    let modulus = input.modulus.max(1);
    let out = dedup_by_representative(
        bytes.iter().copied().enumerate(),
        |&(_, b)| b % modulus,
        |challenger, current| {
            if challenger.item().1 > current.item().1 {
                challenger
            } else {
                current
            }
        },
    );
    assert!(out.windows(2).all(|w| w[0].0 < w[1].0));
    let mut classes: Vec<u8> = out.iter().map(|&(_, b)| b % modulus).collect();
    let count = classes.len();
    classes.sort_unstable();
    classes.dedup();
    assert_eq!(classes.len(), count);
});
