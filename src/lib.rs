//! Facility tasks: the client-side task engine for facility staff.
//!
//! Employees see the tasks assigned to them, split into pending and
//! completed views, and can claim unassigned tasks from their location's
//! pool. Administrators create, assign and remove tasks for the locations
//! they manage. All state lives behind a remote REST API; this crate keeps a
//! consistent local view of it.
//!
//! # Architecture
//!
//! Each module follows the same hexagonal layout:
//!
//! - **Domain**: Pure types and transition rules
//! - **Ports**: Async traits for the remote backend
//! - **Adapters**: HTTP and in-memory implementations of the ports
//! - **Services**: Orchestration bound to a signed-in session
//!
//! # Modules
//!
//! - [`config`]: Layered client configuration
//! - [`api`]: Authenticated JSON client for the backend
//! - [`session`]: Sign-in, roles and location selection
//! - [`task`]: Task lifecycle, pool claiming and administration

pub mod api;
pub mod config;
pub mod session;
pub mod task;
