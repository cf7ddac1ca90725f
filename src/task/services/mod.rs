//! Application services for the task lifecycle.
//!
//! [`TaskBoard`] is the employee-facing engine: it owns the viewer's
//! [`TaskSet`](crate::task::domain::TaskSet) and mediates claim, complete
//! and reopen. [`TaskAdminService`] covers the administrator operations.

mod admin;
mod board;
mod error;

pub use admin::{TaskAdminError, TaskAdminResult, TaskAdminService};
pub use board::TaskBoard;
pub use error::{FailureKind, TaskBoardError, TaskBoardResult};
