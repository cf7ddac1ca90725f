//! Domain model for viewers, their organisation and the active session.
//!
//! Identifiers are assigned by the remote API and treated as opaque
//! integers. Role and location membership drive every authorization
//! decision made by the task engine.

mod directory;
mod error;
mod ids;
mod role;
mod session;
mod viewer;

pub use directory::{Company, Location};
pub use error::{ParseRoleError, SessionDomainError};
pub use ids::{CompanyId, LocationId, UserId};
pub use role::Role;
pub use session::{Session, SessionToken};
pub use viewer::{PersonName, Viewer};
