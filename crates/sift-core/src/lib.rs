//! Sift Core - Fundamental types for adaptive deduplication
//!
//! This crate defines the pieces every deduplication strategy is built on:
//! - Element capabilities (hashable, totally ordered, equality only)
//! - Membership structures (hash buckets, linear scan, degrading visited set)
//! - Error types for capability failures and caller contract violations
//! - Output invariants checks

pub mod capability;
pub mod error;
pub mod invariants;
pub mod membership;

pub use capability::*;
pub use error::*;
pub use membership::*;
