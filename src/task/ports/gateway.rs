//! Remote task accessor port.

use crate::session::domain::{LocationId, UserId};
use crate::task::domain::{Assignment, NewTask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// Request/response boundary to the remote task store.
///
/// Implementations are bound to one authenticated session.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists the tasks assigned to the session's viewer.
    async fn list_viewer_tasks(&self) -> TaskGatewayResult<Vec<Task>>;

    /// Lists the unassigned tasks pooled at `location_id`.
    async fn list_pooled_tasks(&self, location_id: LocationId) -> TaskGatewayResult<Vec<Task>>;

    /// Writes a new status for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Rejected`] when the backend refuses the
    /// change and [`TaskGatewayError::NotFound`] when the task is gone.
    async fn set_status(&self, task_id: TaskId, status: TaskStatus) -> TaskGatewayResult<()>;

    /// Assigns a pooled task to `user_id` and marks it in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError::Rejected`] when someone else claimed the
    /// task first.
    async fn claim_task(&self, task_id: TaskId, user_id: UserId) -> TaskGatewayResult<()>;

    /// Lists every task at `location_id`. Administrators only.
    async fn list_location_tasks(&self, location_id: LocationId) -> TaskGatewayResult<Vec<Task>>;

    /// Creates a task and returns the stored record.
    async fn create_task(&self, task: &NewTask) -> TaskGatewayResult<Task>;

    /// Moves a task to the pool or to a user.
    async fn assign_task(&self, task_id: TaskId, assignment: Assignment) -> TaskGatewayResult<()>;

    /// Removes a task.
    async fn delete_task(&self, task_id: TaskId) -> TaskGatewayResult<()>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The session is missing or expired.
    #[error("session is not authorized")]
    Unauthorized,

    /// The backend refused the change on business grounds.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The task no longer exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The remote API could not be reached or failed temporarily.
    #[error("task transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The remote API answered with a record that failed validation.
    #[error("invalid task response: {0}")]
    InvalidResponse(String),
}

impl TaskGatewayError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` for failures a manual retry may resolve.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
