//! Task aggregate and its three employee-facing transitions.

use super::{Priority, TaskDomainError, TaskId, TaskSource, TaskStatus};
use crate::session::domain::{LocationId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Who a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "user_id", rename_all = "snake_case")]
pub enum Assignment {
    /// Unassigned and claimable by any employee at the task's location.
    Pooled,
    /// Owned by one user.
    User(UserId),
    /// Neither pooled nor assigned; only administrators act on it.
    Unassigned,
}

impl Assignment {
    /// Builds an assignment from the wire pair `is_pooled` / `assigned_to`.
    ///
    /// A pooled task never carries an assignee.
    #[must_use]
    pub const fn from_wire(is_pooled: bool, assigned_to: Option<UserId>) -> Self {
        match (is_pooled, assigned_to) {
            (true, _) => Self::Pooled,
            (false, Some(user_id)) => Self::User(user_id),
            (false, None) => Self::Unassigned,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    location_id: LocationId,
    status: TaskStatus,
    assignment: Assignment,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    last_edited_at: Option<DateTime<Utc>>,
    creator_id: UserId,
    source: TaskSource,
}

/// Parameter object for reconstructing a task read from the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Urgency.
    pub priority: Priority,
    /// Facility the task belongs to.
    pub location_id: LocationId,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Pool membership or owner.
    pub assignment: Assignment,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, required when completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Timestamp of the latest edit.
    pub last_edited_at: Option<DateTime<Utc>>,
    /// User who created the task.
    pub creator_id: UserId,
    /// Origin code.
    pub source: TaskSource,
}

impl Task {
    /// Reconstructs a task, enforcing the completion timestamp invariant.
    ///
    /// A non-completed task never keeps a completion timestamp, and a pooled
    /// task reported as in progress is read back as pending so it stays
    /// claimable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// [`TaskDomainError::MissingCompletionTimestamp`] for a completed task
    /// without a completion timestamp.
    pub fn from_data(data: TaskData) -> Result<Self, TaskDomainError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let completed_at = match data.status {
            TaskStatus::Completed => Some(
                data.completed_at
                    .ok_or(TaskDomainError::MissingCompletionTimestamp(data.id))?,
            ),
            TaskStatus::Pending | TaskStatus::InProgress => None,
        };
        let status = match (data.status, data.assignment) {
            (TaskStatus::InProgress, Assignment::Pooled) => TaskStatus::Pending,
            (reported, _) => reported,
        };

        Ok(Self {
            id: data.id,
            title: title.to_owned(),
            description: data.description.filter(|text| !text.trim().is_empty()),
            due_date: data.due_date,
            priority: data.priority,
            location_id: data.location_id,
            status,
            assignment: data.assignment,
            created_at: data.created_at,
            completed_at,
            last_edited_at: data.last_edited_at,
            creator_id: data.creator_id,
            source: data.source,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the location the task belongs to.
    #[must_use]
    pub const fn location_id(&self) -> LocationId {
        self.location_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the pool membership or owner.
    #[must_use]
    pub const fn assignment(&self) -> Assignment {
        self.assignment
    }

    /// Returns `true` when the task sits in its location's pool.
    #[must_use]
    pub const fn is_pooled(&self) -> bool {
        matches!(self.assignment, Assignment::Pooled)
    }

    /// Returns the owning user; always `None` for pooled tasks.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        match self.assignment {
            Assignment::User(user_id) => Some(user_id),
            Assignment::Pooled | Assignment::Unassigned => None,
        }
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp; set exactly when completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the timestamp of the latest edit, if any.
    #[must_use]
    pub const fn last_edited_at(&self) -> Option<DateTime<Utc>> {
        self.last_edited_at
    }

    /// Returns the creator's user identifier.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the origin code.
    #[must_use]
    pub const fn source(&self) -> TaskSource {
        self.source
    }

    /// Marks the task completed and stamps the completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ClaimRequired`] for a pooled task and
    /// [`TaskDomainError::InvalidTransition`] unless the task is pending or
    /// in progress.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.is_pooled() {
            return Err(TaskDomainError::ClaimRequired(self.id));
        }
        self.ensure_transition(TaskStatus::Completed)?;
        let now = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.last_edited_at = Some(now);
        Ok(())
    }

    /// Relists a completed task as pending and clears the completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// completed.
    pub fn reopen(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Completed {
            return Err(self.invalid_transition(TaskStatus::Pending));
        }
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Takes a pooled task for `user_id` and starts work on it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotPooled`] when the task is not pooled,
    /// or [`TaskDomainError::InvalidTransition`] when it cannot move to
    /// in progress.
    pub fn claim(&mut self, user_id: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if !self.is_pooled() {
            return Err(TaskDomainError::NotPooled(self.id));
        }
        self.ensure_transition(TaskStatus::InProgress)?;
        self.status = TaskStatus::InProgress;
        self.assignment = Assignment::User(user_id);
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to the pool or to a user on an administrator's behalf.
    ///
    /// A task returned to the pool before completion restarts as pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when a completed task
    /// is returned to the pool.
    pub fn reassign(
        &mut self,
        assignment: Assignment,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if matches!(assignment, Assignment::Pooled) {
            match self.status {
                TaskStatus::Completed => return Err(self.invalid_transition(TaskStatus::Pending)),
                TaskStatus::InProgress => self.status = TaskStatus::Pending,
                TaskStatus::Pending => {}
            }
        }
        self.assignment = assignment;
        self.touch(clock);
        Ok(())
    }

    fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(self.invalid_transition(target))
        }
    }

    const fn invalid_transition(&self, target: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.status,
            to: target,
        }
    }

    /// Updates the last-edit timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.last_edited_at = Some(clock.utc());
    }
}
