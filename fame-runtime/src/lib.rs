//! whos-famous runtime
//!
//! Wires the linear pipeline: collect signals, resolve and score them, then
//! look up a fact.

pub mod analyzer;

pub use analyzer::*;
