//! Adapter implementations for the identity port.

pub mod http;
pub mod memory;

pub use http::HttpIdentityGateway;
pub use memory::InMemoryIdentityGateway;
