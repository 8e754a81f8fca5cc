//! Collection types shared by the termfreq crates.

pub mod bounded_top_k;

pub use bounded_top_k::BoundedTopK;
