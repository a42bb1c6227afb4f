//! CLI command implementations.
//!
//! - `clean`: Merge, de-duplicate and filter a delimited list

pub mod clean;

pub use clean::CleanCommand;
