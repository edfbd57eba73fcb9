//! End-to-end deduplication scenarios

use sift_core::invariants::{check_all_invariants, Invariant};
use sift_core::{EqualityOnly, Unhashable};
use sift_engine::{
    dedup, dedup_by_representative, dedup_identity, dedup_keyed, try_dedup_keyed, Deduper,
    FallbackReason, OrderDeduper, Policy, Representative, SelectorConfig, Strategy,
    StrategySelector,
};
use sift_test::{FlakyCounter, SequenceConfig, SequenceGenerator, Value};

const SEQ: [i32; 8] = [4, 4, 1, 2, 3, 1, 2, 3];

fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}

#[test]
fn test_integer_sequence_every_entry_point() {
    assert_eq!(sorted(dedup(SEQ)), vec![1, 2, 3, 4]);
    assert_eq!(dedup_identity(SEQ, Policy::FirstWins), vec![4, 1, 2, 3]);
    assert_eq!(dedup_identity(SEQ, Policy::LastWins), vec![4, 1, 2, 3]);
    assert_eq!(
        dedup_keyed(SEQ, |x| EqualityOnly(*x), Policy::FirstWins),
        vec![4, 1, 2, 3]
    );
}

#[test]
fn test_string_characters() {
    let chars = || "abcabc".chars();
    assert_eq!(sorted(dedup(chars())), vec!['a', 'b', 'c']);
    assert_eq!(
        dedup_identity(chars(), Policy::FirstWins),
        vec!['a', 'b', 'c']
    );
    assert_eq!(
        dedup_identity(chars(), Policy::LastWins),
        vec!['a', 'b', 'c']
    );
}

#[test]
fn test_lists_of_dynamic_values_sort() {
    let seq = vec![
        Value::list([3, 4]),
        Value::list([1, 2]),
        Value::list([2, 3]),
        Value::list([1, 2]),
    ];
    let report = StrategySelector::new().run(seq);

    assert_eq!(report.strategy, Strategy::Order);
    assert_eq!(report.fallbacks.len(), 1);
    assert_eq!(report.fallbacks[0].strategy, Strategy::Hash);
    assert_eq!(
        report.items,
        vec![Value::list([1, 2]), Value::list([2, 3]), Value::list([3, 4])]
    );
}

#[test]
fn test_mixed_dynamic_values_fall_to_linear() {
    let seq = vec![
        Value::Int(1),
        Value::str("1"),
        Value::list([1]),
        Value::Int(1),
        Value::list([1]),
    ];
    let report = StrategySelector::new().run(seq.clone());

    assert_eq!(report.strategy, Strategy::Linear);
    assert!(report
        .fallbacks
        .iter()
        .all(|f| matches!(f.reason, FallbackReason::Failed(_))));
    assert_eq!(
        report.items,
        vec![Value::Int(1), Value::str("1"), Value::list([1])]
    );
    let violations = check_all_invariants(&seq, &report.items, Invariant::all());
    assert!(violations.is_empty());
}

#[test]
fn test_hashable_dynamic_values_use_hash() {
    let seq: Vec<Value> = vec![1.into(), "a".into(), 1.into(), "b".into(), "a".into()];
    let report = StrategySelector::new().run(seq);
    assert_eq!(report.strategy, Strategy::Hash);
    assert_eq!(
        report.items,
        vec![Value::Int(1), Value::str("a"), Value::str("b")]
    );
}

#[test]
fn test_failed_sort_leaves_input_untouched() {
    let counter = FlakyCounter::new(5);
    let input = counter.sequence(&[9, 3, 7, 3, 1, 9, 5, 7]);
    let snapshot: Vec<i32> = input.iter().map(|f| f.value).collect();

    assert!(OrderDeduper.survivors(&input).is_err());
    assert_eq!(input.iter().map(|f| f.value).collect::<Vec<_>>(), snapshot);

    let report = StrategySelector::new().run(&input);
    assert_eq!(report.strategy, Strategy::Order);
    let values: Vec<i32> = report.items.iter().map(|f| f.value).collect();
    assert_eq!(values, vec![1, 3, 5, 7, 9]);
    assert_eq!(input.iter().map(|f| f.value).collect::<Vec<_>>(), snapshot);
}

#[test]
fn test_sort_failure_falls_through_to_linear() {
    let counter = FlakyCounter::new(3);
    let input = counter.sequence(&[9, 3, 7, 3, 1, 9]);

    let report = StrategySelector::new().run(&input);
    assert_eq!(report.strategy, Strategy::Linear);
    let values: Vec<i32> = report.items.iter().map(|f| f.value).collect();
    assert_eq!(values, vec![9, 3, 7, 1]);
    assert_eq!(input.len(), 6);
}

#[test]
fn test_unhashable_but_ordered_wrapper() {
    let seq = SEQ.map(Unhashable);
    let report = StrategySelector::new().run(seq);
    assert_eq!(report.strategy, Strategy::Order);
    assert_eq!(report.items, [1, 2, 3, 4].map(Unhashable).to_vec());
}

#[test]
fn test_nested_lists_by_repr() {
    let lol = vec![
        vec![1, 2],
        vec![],
        vec![1, 2],
        vec![3],
        vec![],
        vec![3, 4],
        vec![1, 2],
        vec![],
        vec![2, 1],
    ];
    let out = dedup_keyed(lol, |v| format!("{:?}", v), Policy::FirstWins);
    assert_eq!(
        out,
        vec![vec![1, 2], vec![], vec![3], vec![3, 4], vec![2, 1]]
    );
}

#[test]
fn test_case_insensitive_lines_keep_last() {
    let text = "Alpha\nbeta\nALPHA\ngamma\nBeta\n";
    let out = dedup_keyed(text.lines(), |line| line.to_lowercase(), Policy::LastWins);
    assert_eq!(out, vec!["ALPHA", "gamma", "Beta"]);
}

#[test]
fn test_key_error_stops_run() {
    let tokens = vec!["1", "2", "x", "1"];
    let err = try_dedup_keyed(tokens, |t| t.parse::<i32>(), Policy::FirstWins).unwrap_err();
    assert_eq!(err.index(), 2);
}

#[test]
fn test_longest_word_per_letter() {
    fn prefer<'a>(
        challenger: Representative<'a, &'static str>,
        current: Representative<'a, &'static str>,
    ) -> Representative<'a, &'static str> {
        if current.item().len() > challenger.item().len() {
            current
        } else {
            challenger
        }
    }

    // Ties go to the challenger, so "a" and "b" win at their last positions
    let words = vec!["a", "1", "b", "a", "b"];
    let out = dedup_by_representative(words, |w| w.chars().next(), prefer);
    assert_eq!(out, vec!["1", "a", "b"]);

    let words = vec!["bob", "ant", "bobby", "antelope", "cat", "b"];
    let out = dedup_by_representative(words, |w| w.chars().next(), prefer);
    assert_eq!(out, vec!["bobby", "antelope", "cat"]);
}

#[test]
fn test_stable_config_on_generated_words() {
    let words = SequenceGenerator::new(SequenceConfig::light()).words();
    let selector = StrategySelector::with_config(SelectorConfig::stable());
    let report = selector.run(words.iter().map(|w| Unhashable(w.clone())));

    assert_eq!(report.strategy, Strategy::Linear);
    let out: Vec<String> = report.items.into_iter().map(|u| u.0).collect();
    let violations = check_all_invariants(&words, &out, Invariant::all());
    assert!(violations.is_empty());
}

#[test]
fn test_generated_dynamic_values() {
    let values = SequenceGenerator::new(SequenceConfig::redundant()).values();
    let out = dedup(values.clone());
    let violations = check_all_invariants(&values, &out, Invariant::unordered());
    assert!(violations.is_empty());

    let first = dedup_identity(values.clone(), Policy::FirstWins);
    let last = dedup_identity(values.clone(), Policy::LastWins);
    assert_eq!(first.len(), out.len());
    assert_eq!(last.len(), out.len());
    let violations = check_all_invariants(&values, &first, Invariant::all());
    assert!(violations.is_empty());
    let violations = check_all_invariants(&values, &last, Invariant::all());
    assert!(violations.is_empty());
}
