//! whos-famous core - domain model for fame estimation
//!
//! This crate provides the pure, network-free pieces:
//! - Search engine registry with per-engine weights and extraction rules
//! - Measured and estimated popularity signals
//! - Fame scoring, categories and status bands
//! - Biographical facts and their length policy

pub mod assessment;
pub mod facts;
pub mod query;
pub mod scoring;
pub mod search_engines;
pub mod signals;

pub use assessment::*;
pub use facts::*;
pub use query::*;
pub use scoring::*;
pub use search_engines::*;
pub use signals::*;

/// Per-request network timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
