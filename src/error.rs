//! Errors returned by fallible tree operations.

use thiserror::Error;

/// The ways a [`Tree`][crate::Tree] operation can fail.
///
/// Only [`Tree::remove`][crate::Tree::remove] is strict about absence. Lookups such as
/// [`Tree::find`][crate::Tree::find] report a missing item with `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested item is not stored in the tree.
    #[error("item not in tree")]
    NotFound,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
