//! Property-based tests for the dependency graph engine and store.

mod graph_properties;
mod safety_tests;
