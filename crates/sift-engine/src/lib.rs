//! Sift Engine - Adaptive sequence deduplication
//!
//! This crate implements the deduplication strategies and their entry points:
//! - Hash, order and linear strategies
//! - Strategy selection with capability fallthrough
//! - Keyed deduplication with first-wins / last-wins policy
//! - Representative picking within equivalence classes

pub mod keyed;
pub mod picker;
pub mod selector;
pub mod sort;
pub mod strategy;

pub use keyed::*;
pub use picker::*;
pub use selector::*;
pub use strategy::*;
