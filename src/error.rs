//! Errors returned by the ordered sets.

use std::result;
use thiserror::Error;

/// Failures surfaced by queries that need at least one stored key.
///
/// Inserting a key that is already present or removing a key that is absent are not errors; both
/// are no-ops reported through the boolean return value of `insert` and `remove`.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The set holds no keys, so there is no minimum or maximum to return.
    #[error("tree is empty")]
    EmptyTree,
}

pub type Result<T> = result::Result<T, Error>;
