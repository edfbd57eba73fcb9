//! Output invariants
//!
//! Every deduplication result must satisfy these laws with respect to its
//! input. They only need equality, so they apply to any element type.
//!
//! 1. **Complete** - every input value appears in the output
//! 2. **Distinct** - no value appears twice in the output
//! 3. **Stable** - the output is a subsequence of the input
//!
//! Stability holds for the order-preserving paths (linear, keyed, picker)
//! and is not expected from the sorting strategy.
//!
//! ```rust
//! use sift_core::invariants::{check_all_invariants, Invariant};
//!
//! let input = [4, 4, 1, 2, 3, 1, 2, 3];
//! let output = [4, 1, 2, 3];
//! assert!(check_all_invariants(&input, &output, Invariant::all()).is_empty());
//! ```

use std::fmt;

use crate::LinearSet;

/// Laws a deduplicated output obeys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Invariant {
    /// Every distinct input value survives
    Complete = 1,

    /// No two output values are equal
    Distinct = 2,

    /// Output keeps the relative input order
    Stable = 3,
}

impl Invariant {
    pub fn code(&self) -> &'static str {
        match self {
            Invariant::Complete => "OUT-1",
            Invariant::Distinct => "OUT-2",
            Invariant::Stable => "OUT-3",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Invariant::Complete => "Complete",
            Invariant::Distinct => "Distinct",
            Invariant::Stable => "Stable",
        }
    }

    pub fn all() -> &'static [Invariant] {
        &[Invariant::Complete, Invariant::Distinct, Invariant::Stable]
    }

    /// Laws that hold whatever strategy produced the output
    pub fn unordered() -> &'static [Invariant] {
        &[Invariant::Complete, Invariant::Distinct]
    }

    /// Check this law for `output` against `input`
    pub fn check<T: PartialEq>(&self, input: &[T], output: &[T]) -> Result<(), InvariantViolation> {
        let context = match self {
            Invariant::Complete => missing_value(input, output)
                .map(|index| format!("input value at {} missing from output", index)),
            Invariant::Distinct => repeated_value(output)
                .map(|(first, again)| format!("output {} repeats output {}", again, first)),
            Invariant::Stable => out_of_order(input, output)
                .map(|index| format!("output {} breaks input order", index)),
        };

        match context {
            None => Ok(()),
            Some(context) => Err(InvariantViolation {
                invariant: *self,
                context,
            }),
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.name())
    }
}

/// Invariant violation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub invariant: Invariant,
    pub context: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dedup Invariant Violation: {} - {}",
            self.invariant, self.context
        )
    }
}

impl std::error::Error for InvariantViolation {}

fn missing_value<T: PartialEq>(input: &[T], output: &[T]) -> Option<usize> {
    input
        .iter()
        .position(|value| !output.iter().any(|kept| kept == value))
}

fn repeated_value<T: PartialEq>(output: &[T]) -> Option<(usize, usize)> {
    let mut seen = LinearSet::with_capacity(output.len());
    output.iter().enumerate().find_map(|(index, value)| {
        let visit = seen.visit_key(value);
        (!visit.is_new()).then(|| (visit.slot(), index))
    })
}

// Greedy subsequence match: each output value must be found after the
// position the previous one matched.
fn out_of_order<T: PartialEq>(input: &[T], output: &[T]) -> Option<usize> {
    let mut cursor = 0;
    for (index, value) in output.iter().enumerate() {
        match input[cursor..].iter().position(|candidate| candidate == value) {
            Some(offset) => cursor += offset + 1,
            None => return Some(index),
        }
    }
    None
}

/// Check a list of laws, returning every violation
pub fn check_all_invariants<T: PartialEq>(
    input: &[T],
    output: &[T],
    invariants: &[Invariant],
) -> Vec<InvariantViolation> {
    invariants
        .iter()
        .filter_map(|invariant| invariant.check(input, output).err())
        .collect()
}

/// Assert a law holds, panicking if violated.
///
/// # Panics
///
/// Panics with the violation message if the law does not hold.
#[track_caller]
pub fn assert_invariant<T: PartialEq>(invariant: Invariant, input: &[T], output: &[T]) {
    if let Err(violation) = invariant.check(input, output) {
        panic!("{}", violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_codes() {
        assert_eq!(Invariant::Complete.code(), "OUT-1");
        assert_eq!(Invariant::Distinct.code(), "OUT-2");
        assert_eq!(Invariant::Stable.code(), "OUT-3");
        assert_eq!(Invariant::all().len(), 3);
    }

    #[test]
    fn test_valid_output() {
        let input = ['a', 'b', 'c', 'a', 'b', 'c'];
        let output = ['a', 'b', 'c'];
        let violations = check_all_invariants(&input, &output, Invariant::all());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_sorted_output_is_not_stable() {
        let input = [4, 4, 1, 2, 3, 1, 2, 3];
        let output = [1, 2, 3, 4];
        let violations = check_all_invariants(&input, &output, Invariant::unordered());
        assert!(violations.is_empty());

        let violations = check_all_invariants(&input, &output, Invariant::all());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].invariant, Invariant::Stable);
    }

    #[test]
    fn test_missing_and_repeated() {
        let input = [1, 2, 3];
        let err = Invariant::Complete.check(&input, &[1, 2]).unwrap_err();
        assert!(err.context.contains("at 2"));

        let err = Invariant::Distinct.check(&input, &[1, 2, 1]).unwrap_err();
        assert_eq!(err.context, "output 2 repeats output 0");
    }

    #[test]
    #[should_panic(expected = "Dedup Invariant Violation")]
    fn test_assert_invariant_panics() {
        assert_invariant(Invariant::Distinct, &[1, 1], &[1, 1]);
    }

    #[test]
    fn test_invariant_display() {
        let display = format!("{}", Invariant::Stable);
        assert!(display.contains("OUT-3"));
        assert!(display.contains("Stable"));
    }
}
