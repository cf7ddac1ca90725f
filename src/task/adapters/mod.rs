//! Adapter implementations for the task gateway port.

pub mod http;
pub mod memory;

pub use http::HttpTaskGateway;
pub use memory::InMemoryTaskGateway;
