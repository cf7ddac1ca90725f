//! Wire records exchanged with the task endpoints.
//!
//! Records are decoded leniently (legacy field and status spellings are
//! accepted) and then validated into domain types. Writes always use the
//! canonical vocabulary.

use crate::{
    session::domain::{LocationId, UserId},
    task::{
        domain::{Assignment, NewTask, Priority, Task, TaskData, TaskId, TaskSource, TaskStatus},
        ports::TaskGatewayError,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every task list response.
#[derive(Debug, Deserialize)]
pub(crate) struct TasksEnvelope {
    pub(crate) tasks: Vec<TaskRecord>,
}

impl TasksEnvelope {
    /// Validates every record; one bad record fails the whole response.
    pub(crate) fn into_tasks(self) -> Result<Vec<Task>, TaskGatewayError> {
        self.tasks.into_iter().map(Task::try_from).collect()
    }
}

/// Task as returned by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskRecord {
    #[serde(alias = "task_id")]
    pub(crate) id: i64,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) due_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) priority: Option<String>,
    pub(crate) location_id: i64,
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) is_pooled: bool,
    #[serde(default)]
    pub(crate) assigned_to: Option<i64>,
    #[serde(alias = "created_at")]
    pub(crate) created_timestamp: DateTime<Utc>,
    #[serde(default, alias = "completed_at")]
    pub(crate) completed_timestamp: Option<DateTime<Utc>>,
    #[serde(default, alias = "last_edited_timestamp")]
    pub(crate) last_edit_timestamp: Option<DateTime<Utc>>,
    pub(crate) creator_id: i64,
    #[serde(default)]
    pub(crate) source: i32,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskGatewayError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let id = TaskId::new(record.id);
        let invalid =
            |reason: String| TaskGatewayError::InvalidResponse(format!("task {id}: {reason}"));

        let status = TaskStatus::try_from(record.status.as_str())
            .map_err(|err| invalid(err.to_string()))?;
        let priority = record
            .priority
            .as_deref()
            .map(Priority::try_from)
            .transpose()
            .map_err(|err| invalid(err.to_string()))?
            .unwrap_or_default();

        Self::from_data(TaskData {
            id,
            title: record.title,
            description: record.description,
            due_date: record.due_date,
            priority,
            location_id: LocationId::new(record.location_id),
            status,
            assignment: Assignment::from_wire(
                record.is_pooled,
                record.assigned_to.map(UserId::new),
            ),
            created_at: record.created_timestamp,
            completed_at: record.completed_timestamp,
            last_edited_at: record.last_edit_timestamp,
            creator_id: UserId::new(record.creator_id),
            source: TaskSource::new(record.source),
        })
        .map_err(|err| invalid(err.to_string()))
    }
}

/// Body of `PATCH tasks/{id}/status`.
#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: TaskStatus,
}

/// Body of `POST tasks/{id}/claim`.
#[derive(Debug, Serialize)]
pub(crate) struct ClaimRequest {
    pub(crate) user_id: UserId,
}

/// Body of `PATCH tasks/{id}/assignment`, mirroring the record fields.
#[derive(Debug, Serialize)]
pub(crate) struct AssignmentUpdate {
    pub(crate) is_pooled: bool,
    pub(crate) assigned_to: Option<UserId>,
}

impl From<Assignment> for AssignmentUpdate {
    fn from(assignment: Assignment) -> Self {
        match assignment {
            Assignment::Pooled => Self {
                is_pooled: true,
                assigned_to: None,
            },
            Assignment::User(user_id) => Self {
                is_pooled: false,
                assigned_to: Some(user_id),
            },
            Assignment::Unassigned => Self {
                is_pooled: false,
                assigned_to: None,
            },
        }
    }
}

/// Body of `POST tasks`.
#[derive(Debug, Serialize)]
pub(crate) struct NewTaskRecord<'a> {
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) due_date: Option<NaiveDate>,
    pub(crate) priority: Priority,
    pub(crate) location_id: LocationId,
    #[serde(flatten)]
    pub(crate) assignment: AssignmentUpdate,
}

impl<'a> From<&'a NewTask> for NewTaskRecord<'a> {
    fn from(task: &'a NewTask) -> Self {
        Self {
            title: task.title(),
            description: task.description(),
            due_date: task.due_date(),
            priority: task.priority(),
            location_id: task.location_id(),
            assignment: task.assignment().into(),
        }
    }
}
