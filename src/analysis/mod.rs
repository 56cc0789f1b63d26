//! Statistics pipeline.
//!
//! This module turns parsed participant records into per-team
//! aggregates and composite scores.

pub mod aggregator;

pub use aggregator::*;
