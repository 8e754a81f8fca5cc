//! Test utilities for the termfreq crates.
//!
//! - [`fixtures`]: small hand-written indexes with known answers
//! - [`data_gen`]: seeded synthetic indexes with skewed term frequencies,
//!   and snapshot files written to temporary locations
//!
//! This crate is only meant for tests and development tools.

pub mod data_gen;
pub mod fixtures;
