//! Element capabilities
//!
//! Every element supports equality. Hashing and total ordering are optional:
//! - A type declares what it offers through [`Element::CAPABILITY`]
//! - [`Element::try_hash`] and [`Element::try_cmp`] report the values for which
//!   the declaration does not hold at runtime (a NaN inside a float, a list
//!   inside a dynamically typed value)
//!
//! Strategies read the declared capability once per call to skip what cannot
//! work, and treat the runtime errors as a signal to fall through.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{CapabilityError, CapabilityResult};

/// Type-level capability declaration
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capability {
    hashable: bool,
    ordered: bool,
}

impl Capability {
    /// Equality only
    pub const EQUALITY: Capability = Capability {
        hashable: false,
        ordered: false,
    };

    /// Hashable, consistent with equality
    pub const HASHABLE: Capability = Capability {
        hashable: true,
        ordered: false,
    };

    /// Totally ordered, consistent with equality
    pub const ORDERED: Capability = Capability {
        hashable: false,
        ordered: true,
    };

    /// Hashable and totally ordered
    pub const FULL: Capability = Capability {
        hashable: true,
        ordered: true,
    };

    /// Declared capability of an element type
    #[inline]
    pub const fn of<T: Element + ?Sized>() -> Self {
        T::CAPABILITY
    }

    #[inline]
    pub const fn is_hashable(self) -> bool {
        self.hashable
    }

    #[inline]
    pub const fn is_ordered(self) -> bool {
        self.ordered
    }

    /// Capabilities shared by both sides (used for composite types)
    #[inline]
    pub const fn meet(self, other: Capability) -> Self {
        Capability {
            hashable: self.hashable && other.hashable,
            ordered: self.ordered && other.ordered,
        }
    }

    #[inline]
    pub const fn without_hash(self) -> Self {
        Capability {
            hashable: false,
            ordered: self.ordered,
        }
    }

    #[inline]
    pub const fn without_order(self) -> Self {
        Capability {
            hashable: self.hashable,
            ordered: false,
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({})", self)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hashable, self.ordered) {
            (true, true) => f.write_str("hashable+ordered"),
            (true, false) => f.write_str("hashable"),
            (false, true) => f.write_str("ordered"),
            (false, false) => f.write_str("equality"),
        }
    }
}

/// A value that can be deduplicated.
///
/// Implementors must keep `try_hash` and `try_cmp` consistent with
/// `PartialEq`: equal values hash alike, and `try_cmp` returns
/// `Ordering::Equal` exactly for equal values. The defaults declare
/// equality only and refuse both operations.
pub trait Element: PartialEq {
    const CAPABILITY: Capability = Capability::EQUALITY;

    /// Feed this value into `state`
    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        let _ = state;
        Err(CapabilityError::Unhashable)
    }

    /// Compare against `other` under the type's total order
    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        let _ = other;
        Err(CapabilityError::Unorderable)
    }
}

/// Implement [`Element`] for types that already carry the std traits.
///
/// ```rust
/// use sift_core::{impl_element, Capability, Element};
///
/// #[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
/// struct Word(String);
///
/// #[derive(PartialEq)]
/// struct Blob(Vec<f32>);
///
/// impl_element!(full: Word);
/// impl_element!(eq: Blob);
///
/// assert_eq!(Capability::of::<Word>(), Capability::FULL);
/// assert_eq!(Capability::of::<Blob>(), Capability::EQUALITY);
/// ```
#[macro_export]
macro_rules! impl_element {
    (full: $($t:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $t {
                const CAPABILITY: $crate::Capability = $crate::Capability::FULL;

                #[inline]
                fn try_hash<H: ::std::hash::Hasher>(
                    &self,
                    state: &mut H,
                ) -> $crate::CapabilityResult<()> {
                    ::std::hash::Hash::hash(self, state);
                    Ok(())
                }

                #[inline]
                fn try_cmp(&self, other: &Self) -> $crate::CapabilityResult<::std::cmp::Ordering> {
                    Ok(::std::cmp::Ord::cmp(self, other))
                }
            }
        )+
    };
    (hash: $($t:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $t {
                const CAPABILITY: $crate::Capability = $crate::Capability::HASHABLE;

                #[inline]
                fn try_hash<H: ::std::hash::Hasher>(
                    &self,
                    state: &mut H,
                ) -> $crate::CapabilityResult<()> {
                    ::std::hash::Hash::hash(self, state);
                    Ok(())
                }
            }
        )+
    };
    (ord: $($t:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $t {
                const CAPABILITY: $crate::Capability = $crate::Capability::ORDERED;

                #[inline]
                fn try_cmp(&self, other: &Self) -> $crate::CapabilityResult<::std::cmp::Ordering> {
                    Ok(::std::cmp::Ord::cmp(self, other))
                }
            }
        )+
    };
    (eq: $($t:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $t {}
        )+
    };
}

impl_element!(full: (), bool, char, u8, u16, u32, u64, u128, usize);
impl_element!(full: i8, i16, i32, i64, i128, isize, str, String);

// Floats order everywhere except NaN and have no hash consistent with `==`
// (0.0 == -0.0 but their bits differ).
macro_rules! impl_element_float {
    ($($t:ty),+) => {
        $(
            impl Element for $t {
                const CAPABILITY: Capability = Capability::ORDERED;

                #[inline]
                fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
                    self.partial_cmp(other).ok_or(CapabilityError::Unorderable)
                }
            }
        )+
    };
}

impl_element_float!(f32, f64);

impl<T: Element + ?Sized> Element for &T {
    const CAPABILITY: Capability = T::CAPABILITY;

    #[inline]
    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        (**self).try_hash(state)
    }

    #[inline]
    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        (**self).try_cmp(*other)
    }
}

impl<T: Element + ?Sized> Element for Box<T> {
    const CAPABILITY: Capability = T::CAPABILITY;

    #[inline]
    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        (**self).try_hash(state)
    }

    #[inline]
    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        (**self).try_cmp(&**other)
    }
}

impl<T: Element> Element for Option<T> {
    const CAPABILITY: Capability = T::CAPABILITY;

    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        match self {
            None => {
                state.write_u8(0);
                Ok(())
            }
            Some(value) => {
                state.write_u8(1);
                value.try_hash(state)
            }
        }
    }

    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        match (self, other) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(a), Some(b)) => a.try_cmp(b),
        }
    }
}

impl<T: Element> Element for [T] {
    const CAPABILITY: Capability = T::CAPABILITY;

    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        state.write_usize(self.len());
        for item in self {
            item.try_hash(state)?;
        }
        Ok(())
    }

    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.try_cmp(b)? {
                Ordering::Equal => continue,
                unequal => return Ok(unequal),
            }
        }
        Ok(self.len().cmp(&other.len()))
    }
}

impl<T: Element> Element for Vec<T> {
    const CAPABILITY: Capability = T::CAPABILITY;

    #[inline]
    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        self.as_slice().try_hash(state)
    }

    #[inline]
    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        self.as_slice().try_cmp(other.as_slice())
    }
}

macro_rules! impl_element_tuple {
    ($first:ident $(, $rest:ident)*; $($idx:tt),+) => {
        impl<$first: Element $(, $rest: Element)*> Element for ($first, $($rest,)*) {
            const CAPABILITY: Capability = $first::CAPABILITY $(.meet($rest::CAPABILITY))*;

            fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
                $( self.$idx.try_hash(state)?; )+
                Ok(())
            }

            fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
                $(
                    match self.$idx.try_cmp(&other.$idx)? {
                        Ordering::Equal => {}
                        unequal => return Ok(unequal),
                    }
                )+
                Ok(Ordering::Equal)
            }
        }
    };
}

impl_element_tuple!(A; 0);
impl_element_tuple!(A, B; 0, 1);
impl_element_tuple!(A, B, C; 0, 1, 2);
impl_element_tuple!(A, B, C, D; 0, 1, 2, 3);

/// Wrapper that hides the hash of its contents, keeping order and equality
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Unhashable<T>(pub T);

impl<T: Element> Element for Unhashable<T> {
    const CAPABILITY: Capability = T::CAPABILITY.without_hash();

    #[inline]
    fn try_cmp(&self, other: &Self) -> CapabilityResult<Ordering> {
        self.0.try_cmp(&other.0)
    }
}

/// Wrapper that hides everything but equality
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EqualityOnly<T>(pub T);

impl<T: PartialEq> Element for EqualityOnly<T> {}

/// Wrapper for `Hash + Eq` types whose std ordering should not be used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct HashOnly<T>(pub T);

impl<T: Hash + Eq> Element for HashOnly<T> {
    const CAPABILITY: Capability = Capability::HASHABLE;

    #[inline]
    fn try_hash<H: Hasher>(&self, state: &mut H) -> CapabilityResult<()> {
        self.0.hash(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Element + ?Sized>(value: &T) -> CapabilityResult<u64> {
        let mut hasher = DefaultHasher::new();
        value.try_hash(&mut hasher)?;
        Ok(hasher.finish())
    }

    #[test]
    fn test_declared_capabilities() {
        assert_eq!(Capability::of::<u32>(), Capability::FULL);
        assert_eq!(Capability::of::<&str>(), Capability::FULL);
        assert_eq!(Capability::of::<f64>(), Capability::ORDERED);
        assert_eq!(Capability::of::<Vec<f64>>(), Capability::ORDERED);
        assert_eq!(Capability::of::<(u8, f32)>(), Capability::ORDERED);
        assert_eq!(Capability::of::<Unhashable<i32>>(), Capability::ORDERED);
        assert_eq!(Capability::of::<EqualityOnly<i32>>(), Capability::EQUALITY);
        assert_eq!(Capability::of::<HashOnly<i32>>(), Capability::HASHABLE);
        assert_eq!(
            Capability::of::<(HashOnly<u8>, Unhashable<u8>)>(),
            Capability::EQUALITY
        );
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::FULL.to_string(), "hashable+ordered");
        assert_eq!(Capability::EQUALITY.to_string(), "equality");
        assert_eq!(format!("{:?}", Capability::ORDERED), "Capability(ordered)");
    }

    #[test]
    fn test_equal_values_hash_alike() {
        let a = vec![(1u8, "x".to_string()), (2, "y".to_string())];
        let b = a.clone();
        assert_eq!(hash_of(&a).unwrap(), hash_of(&b).unwrap());
        assert_eq!(
            hash_of("abc").unwrap(),
            hash_of(&"abc".to_string()).unwrap()
        );
    }

    #[test]
    fn test_refused_capabilities() {
        assert_eq!(hash_of(&1.5f64), Err(CapabilityError::Unhashable));
        assert_eq!(hash_of(&Unhashable(3i32)), Err(CapabilityError::Unhashable));
        assert_eq!(
            EqualityOnly(1i32).try_cmp(&EqualityOnly(2)),
            Err(CapabilityError::Unorderable)
        );
        assert_eq!(
            HashOnly(1i32).try_cmp(&HashOnly(2)),
            Err(CapabilityError::Unorderable)
        );
    }

    #[test]
    fn test_float_nan_unorderable() {
        assert_eq!(1.0f64.try_cmp(&2.0), Ok(Ordering::Less));
        assert_eq!(f64::NAN.try_cmp(&2.0), Err(CapabilityError::Unorderable));
        assert_eq!(
            vec![1.0, f64::NAN].try_cmp(&vec![1.0, 0.0]),
            Err(CapabilityError::Unorderable)
        );
    }

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(vec![1i32, 2].try_cmp(&vec![1, 2, 0]), Ok(Ordering::Less));
        assert_eq!(vec![3i32].try_cmp(&vec![1, 2]), Ok(Ordering::Greater));
        assert_eq!((1i32, 'b').try_cmp(&(1, 'a')), Ok(Ordering::Greater));
        assert_eq!(None::<u8>.try_cmp(&Some(0)), Ok(Ordering::Less));
        assert_eq!(
            Unhashable(2i32).try_cmp(&Unhashable(2)),
            Ok(Ordering::Equal)
        );
    }
}
