//! Shared test utilities for skillgraph.

pub mod fixtures;
