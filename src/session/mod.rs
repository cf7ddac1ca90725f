//! Session and identity access for the facility task engine.
//!
//! A [`domain::Session`] is the explicit context every task operation runs
//! against: the authenticated viewer, their role, the locations they may
//! operate on and the one location currently selected. Sessions are created
//! by [`services::SessionService::sign_in`] and torn down by
//! [`services::SessionService::sign_out`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
