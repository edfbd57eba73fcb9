//! Dynamically typed values
//!
//! [`Value`] declares full capability at the type level but refuses it for
//! some values at runtime, the way loosely typed data behaves:
//! - lists cannot be hashed
//! - values of different kinds cannot be ordered against each other
//!
//! This makes every fallthrough of the strategy cascade reachable.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use sift_core::{Capability, CapabilityError, CapabilityResult, Element};

#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn list<I: IntoIterator<Item = i64>>(items: I) -> Self {
        Value::List(items.into_iter().map(Value::Int).collect())
    }

    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::List(_) => "list",
        }
    }
}

impl Element for Value {
    const CAPABILITY: Capability = Capability::FULL;

    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        match self {
            Value::Int(n) => {
                state.write_u8(0);
                n.hash(state);
                Ok(())
            }
            Value::Str(s) => {
                state.write_u8(1);
                s.hash(state);
                Ok(())
            }
            Value::List(_) => Err(CapabilityError::Unhashable),
        }
    }

    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::List(a), Value::List(b)) => a.try_cmp(b),
            _ => Err(CapabilityError::Unorderable),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}
