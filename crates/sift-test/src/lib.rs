//! Sift Test Harness - Fixtures and generators for deduplication testing
//!
//! This crate provides:
//! - A dynamically typed value whose capabilities vary per value
//! - Comparators that fail on demand
//! - Seeded sequence generation for property tests and benchmarks

pub mod dynamic;
pub mod fixtures;
pub mod generator;

pub use dynamic::*;
pub use fixtures::*;
pub use generator::*;
