//! Report generation.
//!
//! Renders a demographic summary as plain text, Markdown or JSON.

mod generator;

pub use generator::*;
