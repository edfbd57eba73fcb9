//! Stable merge sort with a fallible comparator
//!
//! `slice::sort_by` cannot stop on a failed comparison, so a comparator that
//! meets two incomparable values would have to invent an answer. This sort
//! returns the first comparator error instead. The slice may be left
//! partially sorted on error; callers sort a private copy.

use std::cmp::Ordering;

/// Runs at or below this length are insertion sorted
const INSERTION_THRESHOLD: usize = 12;

/// Sort `v` stably, stopping at the first comparator error
pub fn try_sort_by<T, E, F>(v: &mut [T], mut compare: F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if v.len() <= INSERTION_THRESHOLD {
        return insertion_sort(v, &mut compare);
    }
    let mut buf = v.to_vec();
    merge_sort(v, &mut buf, &mut compare)
}

fn insertion_sort<T, E, F>(v: &mut [T], compare: &mut F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && compare(&v[j], &v[j - 1])? == Ordering::Less {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

fn merge_sort<T, E, F>(v: &mut [T], buf: &mut [T], compare: &mut F) -> Result<(), E>
where
    T: Copy,
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = v.len();
    if len <= INSERTION_THRESHOLD {
        return insertion_sort(v, compare);
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        let (left_buf, right_buf) = buf.split_at_mut(mid);
        merge_sort(left, left_buf, compare)?;
        merge_sort(right, right_buf, compare)?;
    }

    buf[..len].copy_from_slice(v);
    let (left, right) = buf[..len].split_at(mid);
    let (mut i, mut j, mut k) = (0, 0, 0);

    while i < left.len() && j < right.len() {
        // Take from the right only when strictly smaller, for stability
        if compare(&right[j], &left[i])? == Ordering::Less {
            v[k] = right[j];
            j += 1;
        } else {
            v[k] = left[i];
            i += 1;
        }
        k += 1;
    }

    let rest = left.len() - i;
    v[k..k + rest].copy_from_slice(&left[i..]);
    k += rest;
    v[k..].copy_from_slice(&right[j..]);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn by_key(v: &mut [(u8, usize)]) -> Result<(), ()> {
        try_sort_by(v, |a, b| Ok(a.0.cmp(&b.0)))
    }

    #[test]
    fn test_sort_small_and_large() {
        let mut small = [3, 1, 2];
        try_sort_by(&mut small, |a: &i32, b: &i32| Ok::<_, ()>(a.cmp(b))).unwrap();
        assert_eq!(small, [1, 2, 3]);

        let mut large: Vec<i32> = (0..100).rev().collect();
        try_sort_by(&mut large, |a: &i32, b: &i32| Ok::<_, ()>(a.cmp(b))).unwrap();
        assert_eq!(large, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_stops_on_error() {
        let mut v: Vec<i32> = (0..50).rev().collect();
        let mut calls = 0;
        let result = try_sort_by(&mut v, |a: &i32, b: &i32| {
            calls += 1;
            if calls == 20 {
                Err("incomparable")
            } else {
                Ok(a.cmp(b))
            }
        });
        assert_eq!(result, Err("incomparable"));
        assert_eq!(calls, 20);
    }

    proptest! {
        #[test]
        fn prop_matches_std_stable_sort(keys in proptest::collection::vec(0u8..8, 0..200)) {
            let mut ours: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
            let mut std_sorted = ours.clone();
            by_key(&mut ours).unwrap();
            std_sorted.sort_by_key(|pair| pair.0);
            prop_assert_eq!(ours, std_sorted);
        }
    }
}
