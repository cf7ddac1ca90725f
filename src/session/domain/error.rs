//! Error types for session domain validation and parsing.

use super::LocationId;
use thiserror::Error;

/// Errors returned while constructing session domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// The session token is empty after trimming.
    #[error("session token must not be empty")]
    EmptyToken,

    /// The viewer's role string is not recognised.
    #[error(transparent)]
    UnknownRole(#[from] ParseRoleError),

    /// The viewer may not operate on the requested location.
    #[error("location {0} is not available to this viewer")]
    LocationNotPermitted(LocationId),
}

/// Error returned while parsing a role string from the remote API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
