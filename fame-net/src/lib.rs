//! whos-famous network layer
//!
//! Everything that touches the web:
//! - HTTP client construction with browser User-Agents
//! - A [`PageFetcher`] seam over reqwest
//! - Per-engine result extraction behind [`Extractor`]
//! - The sequential signal collector
//! - The encyclopedia / search fact retriever

pub mod client;
pub mod collector;
pub mod extract;
pub mod facts;
pub mod fetch;

pub use client::*;
pub use collector::*;
pub use extract::*;
pub use facts::*;
pub use fetch::*;
