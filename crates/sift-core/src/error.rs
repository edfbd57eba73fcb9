//! Error types for Sift

use std::convert::Infallible;

use thiserror::Error;

/// Capability failures raised while probing an element.
///
/// These drive fallthrough between strategies and never reach the caller
/// of the top-level deduplication functions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityError {
    #[error("Unhashable element")]
    Unhashable,

    #[error("Unorderable elements")]
    Unorderable,
}

/// Result type for capability-gated operations
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Caller contract violations.
///
/// Raised when a caller-supplied key or pick function fails. These are
/// never recovered and propagate as soon as they occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiftError<E> {
    #[error("Key function failed on element {index}: {cause}")]
    Key { index: usize, cause: E },

    #[error("Pick function failed on challenger {index}: {cause}")]
    Pick { index: usize, cause: E },
}

impl<E> SiftError<E> {
    /// Index of the element being processed when the failure happened
    pub fn index(&self) -> usize {
        match self {
            SiftError::Key { index, .. } | SiftError::Pick { index, .. } => *index,
        }
    }

    /// The caller's own error value
    pub fn into_cause(self) -> E {
        match self {
            SiftError::Key { cause, .. } | SiftError::Pick { cause, .. } => cause,
        }
    }
}

/// Result type for operations driven by caller-supplied functions
pub type SiftResult<T, E = Infallible> = Result<T, SiftError<E>>;

/// Unwrap a result whose caller functions cannot fail.
pub fn infallible<T>(result: SiftResult<T, Infallible>) -> T {
    let Ok(value) = result;
    value
}
