//! Elements with scripted comparison failures

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

use sift_core::{Capability, CapabilityError, CapabilityResult, Element};

/// Shared comparison counter for a family of [`Flaky`] elements
#[derive(Clone, Debug)]
pub struct FlakyCounter {
    comparisons: Rc<Cell<usize>>,
    fail_on: usize,
}

impl FlakyCounter {
    /// Comparisons fail on exactly the `fail_on`-th call (1-based)
    pub fn new(fail_on: usize) -> Self {
        FlakyCounter {
            comparisons: Rc::new(Cell::new(0)),
            fail_on,
        }
    }

    pub fn element(&self, value: i32) -> Flaky {
        Flaky {
            value,
            counter: self.clone(),
        }
    }

    pub fn sequence(&self, values: &[i32]) -> Vec<Flaky> {
        values.iter().map(|&value| self.element(value)).collect()
    }

    /// Comparisons made so far
    pub fn comparisons(&self) -> usize {
        self.comparisons.get()
    }

    fn tick(&self) -> CapabilityResult<()> {
        let count = self.comparisons.get() + 1;
        self.comparisons.set(count);
        if count == self.fail_on {
            Err(CapabilityError::Unorderable)
        } else {
            Ok(())
        }
    }
}

/// Ordered integer whose N-th comparison fails
#[derive(Clone, Debug)]
pub struct Flaky {
    pub value: i32,
    counter: FlakyCounter,
}

impl PartialEq for Flaky {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Element for Flaky {
    const CAPABILITY: Capability = Capability::ORDERED;

    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        self.counter.tick()?;
        Ok(self.value.cmp(&other.value))
    }
}
