//! Dataset loading.
//!
//! This module reads the census CSV into an in-memory [`Dataset`].
//! Every input problem is reported here, before any aggregation runs.

mod csv_loader;

pub use csv_loader::*;
