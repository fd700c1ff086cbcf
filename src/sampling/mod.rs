//! Weighted sampling over labelled records.
//!
//! ## Key Types
//!
//! - `WeightRecord<T>`: a `(label, weight)` pair
//! - `WeightTable<T>`: validated records with their total precomputed
//! - `sample_weighted`: one-off draw straight from a record slice

pub mod weighted;

pub use weighted::{sample_weighted, validate_weights, WeightRecord, WeightTable};
