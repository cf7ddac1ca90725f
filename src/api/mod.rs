//! Authenticated HTTP access to the facility management API.
//!
//! [`ApiClient`] is shared by the session and task HTTP adapters. It owns
//! the base URL, request timeout and optional bearer token, and maps every
//! non-success response onto [`ApiError`] so adapters only deal with
//! request construction and record validation.

mod client;
mod error;
mod response;

pub use client::ApiClient;
pub use error::ApiError;
