//! Error taxonomy surfaced by the task board.

use crate::{
    session::domain::LocationId,
    task::{
        domain::{TaskDomainError, TaskId, Transition},
        ports::TaskGatewayError,
    },
};
use thiserror::Error;

/// How the consumer should react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request was refused locally; nothing was sent.
    Precondition,
    /// The session is missing or expired; send the user back to login.
    Authorization,
    /// The backend refused the change; notify, do not retry.
    Rejected,
    /// The network or backend failed temporarily; notify, allow a manual retry.
    Transient,
    /// The backend applied the change but the local view had already moved
    /// on; refresh, do not retry.
    Stale,
}

/// Service-level errors for task board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// The task is not in the viewer's pending bucket.
    #[error("task {0} is not pending or in progress")]
    NotPending(TaskId),

    /// The task is not in the viewer's completed bucket.
    #[error("task {0} is not completed")]
    NotCompleted(TaskId),

    /// The task is not in the selected location's pool.
    #[error("task {0} is not in the pool")]
    NotInPool(TaskId),

    /// Another transition for the same task has not settled yet.
    #[error("task {task_id} already has a {active} in flight")]
    Busy {
        /// Task addressed twice.
        task_id: TaskId,
        /// Transition still outstanding.
        active: Transition,
    },

    /// The viewer may not operate against the location.
    #[error("location {0} is not available to this viewer")]
    LocationNotPermitted(LocationId),

    /// The backend confirmed the transition, but a concurrent refresh had
    /// already taken the task out of the local view.
    #[error("task {task_id} changed locally while its {transition} was confirmed")]
    Superseded {
        /// Task the transition was applied to remotely.
        task_id: TaskId,
        /// Transition the backend confirmed.
        transition: Transition,
    },

    /// The board was torn down.
    #[error("task board has been closed")]
    Closed,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The remote call failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
}

impl TaskBoardError {
    /// Classifies the error for the consumer.
    #[must_use]
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Gateway(TaskGatewayError::Unauthorized) => FailureKind::Authorization,
            Self::Gateway(TaskGatewayError::Transport(_)) => FailureKind::Transient,
            Self::Gateway(
                TaskGatewayError::Rejected(_)
                | TaskGatewayError::NotFound(_)
                | TaskGatewayError::InvalidResponse(_),
            ) => FailureKind::Rejected,
            Self::Superseded { .. } => FailureKind::Stale,
            Self::NotPending(_)
            | Self::NotCompleted(_)
            | Self::NotInPool(_)
            | Self::Busy { .. }
            | Self::LocationNotPermitted(_)
            | Self::Closed
            | Self::Domain(_) => FailureKind::Precondition,
        }
    }

    /// Returns `true` when the caller must send the user back to login.
    #[must_use]
    pub const fn requires_reauthentication(&self) -> bool {
        matches!(self.failure_kind(), FailureKind::Authorization)
    }

    /// Returns `true` for failures a manual retry may resolve.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self.failure_kind(), FailureKind::Transient)
    }

    pub(crate) const fn missing_from(transition: Transition, task_id: TaskId) -> Self {
        match transition {
            Transition::Claim => Self::NotInPool(task_id),
            Transition::Complete => Self::NotPending(task_id),
            Transition::Reopen => Self::NotCompleted(task_id),
        }
    }
}

/// Result type for task board operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;
