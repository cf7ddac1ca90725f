//! HTTP task gateway and its wire records.

mod gateway;
mod models;

pub use gateway::HttpTaskGateway;
