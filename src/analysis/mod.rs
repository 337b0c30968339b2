//! Analysis modules.
//!
//! The aggregator computes the demographic summary from a loaded dataset.

pub mod aggregator;

pub use aggregator::*;
