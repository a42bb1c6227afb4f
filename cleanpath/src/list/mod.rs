//! In-place rewriting of delimiter-separated token lists.
//!
//! Both passes work directly on one [`Buffer`](crate::Buffer) without an
//! auxiliary copy of the list:
//!
//! - [`compact_runs`] collapses runs of delimiters and drops leading and
//!   trailing ones.
//! - [`walk_and_clean`] removes later duplicates of every token and asks a
//!   [`TokenFilter`](crate::TokenFilter) whether the token itself stays.

mod compact;
mod walk;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use compact::compact_runs;
pub use walk::{walk_and_clean, WalkSummary};
