//! Error types for task domain validation and parsing.

use super::{Bucket, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A completed task arrived without a completion timestamp.
    #[error("completed task {0} has no completion timestamp")]
    MissingCompletionTimestamp(TaskId),

    /// The requested state transition is not permitted.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        /// Task whose state was to change.
        task_id: TaskId,
        /// Current state.
        from: TaskStatus,
        /// Requested target state.
        to: TaskStatus,
    },

    /// Only pooled tasks can be claimed.
    #[error("task {0} is not in the pool")]
    NotPooled(TaskId),

    /// Pooled tasks must be claimed before they can be completed.
    #[error("task {0} must be claimed before it can be completed")]
    ClaimRequired(TaskId),

    /// The task is not held in the expected bucket.
    #[error("task {task_id} is not in the {bucket} bucket")]
    NotInBucket {
        /// Task that was looked up.
        task_id: TaskId,
        /// Bucket that was searched.
        bucket: Bucket,
    },
}

/// Error returned while parsing task statuses from the remote API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from the remote API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
