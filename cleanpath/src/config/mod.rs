//! Configuration system for cleanpath.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (CLEANPATH_*)
//! 3. User config (`$CLEANPATH_CONFIG`, else `~/.cleanpath.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use cleanpath::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config { delimiter: Some(';'), ..Config::default() })
//!     .build()
//!     .unwrap();
//!
//! let options = config.resolve().unwrap();
//! assert_eq!(options.delimiter, b';');
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_PATH_ENV};
pub use merger::ConfigMerger;
pub use schema::{Config, DEFAULT_VARIABLE};
pub use validator::ConfigValidator;
