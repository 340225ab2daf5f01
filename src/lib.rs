pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod pool;
pub mod storage;
pub mod store;
pub mod test_utils;

pub use error::{Result, SgError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
