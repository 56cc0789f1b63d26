//! Report generation modules.
//!
//! Everything here is a pure projection over the aggregator's output:
//! Markdown feedback profiles for humans and a JSON session export for
//! rendering collaborators.

pub mod generator;

pub use generator::*;
