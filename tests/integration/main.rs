//! Library-level integration tests: store scenarios and persistence backends.

mod backend_tests;
mod fixture;
mod scenario_tests;
