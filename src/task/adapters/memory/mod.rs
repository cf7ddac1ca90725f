//! In-memory task gateway for tests and offline flows.

mod task;

pub use task::InMemoryTaskGateway;
