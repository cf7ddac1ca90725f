//! Port contracts for task access.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod gateway;

pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult};
