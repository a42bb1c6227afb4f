//! Error types for the cleanpath library.
//!
//! Only conditions a caller has to act on are errors. An invalid splice range
//! or a token rejected by a filter are ordinary return values, not variants
//! of [`Error`].

use thiserror::Error;

/// Result type alias for operations that may fail with a cleanpath error.
///
/// # Examples
///
/// ```
/// use cleanpath::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cleanpath library.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage for a buffer or for the registry table could not be obtained.
    ///
    /// The pipeline treats this as fatal: no partial output is produced.
    #[error("unable to allocate {requested} bytes")]
    Allocation {
        /// The number of bytes that were requested.
        requested: usize,
    },

    /// A buffer that was already released was asked to hold data.
    #[error("buffer slot {slot} has been released")]
    StaleHandle {
        /// The registry slot the buffer referred to.
        slot: usize,
    },

    /// A delimiter value was rejected.
    #[error("invalid delimiter {value:?}: {reason}")]
    InvalidDelimiter {
        /// The rejected value as given.
        value: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if error reports exhausted memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cleanpath::Error;
    ///
    /// let err = Error::Allocation { requested: 4096 };
    /// assert!(err.is_allocation_failure());
    /// ```
    #[must_use]
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }

    /// Check if error comes from configuration loading or validation.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Validation { .. } | Self::InvalidDelimiter { .. }
        )
    }
}
