#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cleanpath
//!
//! A library for cleaning delimiter-separated token lists such as `PATH`.
//!
//! The list is merged with caller supplied tokens, redundant delimiters are
//! collapsed, duplicate tokens are removed (the first occurrence wins) and
//! tokens may optionally be filtered by a filesystem check.
//!
//! ## Core Types
//!
//! - [`Registry`] and [`Buffer`]: Growable byte buffers tracked by an
//!   explicit allocation registry
//! - [`compact_runs`] and [`walk_and_clean`]: In-place list rewriting
//! - [`TokenFilter`] and [`FilesystemFilter`]: Per-token keep/reject checks
//! - [`clean`] and [`CleanOptions`]: The full pipeline
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use cleanpath::{clean, CleanOptions, KeepAll, Registry};
//!
//! let mut registry = Registry::new();
//! let options = CleanOptions::default();
//! let cleaned = clean(
//!     &mut registry,
//!     b"/a:/b:/a:/c",
//!     &["/d"],
//!     &options,
//!     &mut KeepAll,
//! )
//! .unwrap();
//! assert_eq!(cleaned, b"/a:/b:/c:/d");
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod filter;
pub mod list;
pub mod logging;
pub mod pipeline;

// Re-export key types at crate root for convenience
pub use buffer::{Buffer, Handle, Registry};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use filter::{CheckMode, FilesystemFilter, KeepAll, TokenFilter};
pub use list::{compact_runs, walk_and_clean, WalkSummary};
pub use logging::{init_logger, LogLevel, Logger};
pub use pipeline::{apply_size_limit, build_list, clean, parse_delimiter, CleanOptions, Order};
