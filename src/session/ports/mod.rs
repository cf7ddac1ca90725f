//! Port contracts for identity lookups.
//!
//! Ports define infrastructure-agnostic interfaces used by session services.

pub mod identity;

pub use identity::{IdentityGateway, IdentityGatewayError, IdentityGatewayResult};
