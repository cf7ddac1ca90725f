//! Task gateway calling the remote API through [`ApiClient`].

use super::models::{
    AssignmentUpdate, ClaimRequest, NewTaskRecord, StatusUpdate, TaskRecord, TasksEnvelope,
};
use crate::{
    api::{ApiClient, ApiError},
    session::domain::{LocationId, UserId},
    task::{
        domain::{Assignment, NewTask, Task, TaskId, TaskStatus},
        ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
    },
};
use async_trait::async_trait;
use reqwest::Method;

/// Maps a boundary error onto the port's taxonomy.
///
/// A 404 on a task-addressed call means the task is gone; elsewhere it is
/// treated as a rejection.
fn map_api_error(err: ApiError, task_id: Option<TaskId>) -> TaskGatewayError {
    match err {
        ApiError::Unauthorized { .. } => TaskGatewayError::Unauthorized,
        ApiError::NotFound { message } => match task_id {
            Some(id) => TaskGatewayError::NotFound(id),
            None => TaskGatewayError::Rejected(message),
        },
        ApiError::Rejected { message, .. } => TaskGatewayError::Rejected(message),
        ApiError::InvalidBaseUrl { .. } | ApiError::InvalidEndpoint { .. } => {
            TaskGatewayError::Rejected(err.to_string())
        }
        ApiError::Decode(message) => TaskGatewayError::InvalidResponse(message),
        ApiError::Unavailable { .. } | ApiError::Transport(_) => TaskGatewayError::transport(err),
    }
}

/// Task gateway bound to one authenticated [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    api: ApiClient,
}

impl HttpTaskGateway {
    /// Creates a gateway; `api` should already carry the session token.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn list(&self, path: &str) -> TaskGatewayResult<Vec<Task>> {
        let envelope: TasksEnvelope = self
            .api
            .get_json(path)
            .await
            .map_err(|err| map_api_error(err, None))?;
        envelope.into_tasks()
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list_viewer_tasks(&self) -> TaskGatewayResult<Vec<Task>> {
        self.list("tasks/mine").await
    }

    async fn list_pooled_tasks(&self, location_id: LocationId) -> TaskGatewayResult<Vec<Task>> {
        self.list(&format!("locations/{location_id}/tasks/pooled"))
            .await
    }

    async fn set_status(&self, task_id: TaskId, status: TaskStatus) -> TaskGatewayResult<()> {
        self.api
            .send_body(
                Method::PATCH,
                &format!("tasks/{task_id}/status"),
                &StatusUpdate { status },
            )
            .await
            .map_err(|err| map_api_error(err, Some(task_id)))
    }

    async fn claim_task(&self, task_id: TaskId, user_id: UserId) -> TaskGatewayResult<()> {
        self.api
            .send_body(
                Method::POST,
                &format!("tasks/{task_id}/claim"),
                &ClaimRequest { user_id },
            )
            .await
            .map_err(|err| map_api_error(err, Some(task_id)))
    }

    async fn list_location_tasks(&self, location_id: LocationId) -> TaskGatewayResult<Vec<Task>> {
        self.list(&format!("locations/{location_id}/tasks")).await
    }

    async fn create_task(&self, task: &NewTask) -> TaskGatewayResult<Task> {
        let record: TaskRecord = self
            .api
            .send_json(Method::POST, "tasks", &NewTaskRecord::from(task))
            .await
            .map_err(|err| map_api_error(err, None))?;
        Task::try_from(record)
    }

    async fn assign_task(&self, task_id: TaskId, assignment: Assignment) -> TaskGatewayResult<()> {
        self.api
            .send_body(
                Method::PATCH,
                &format!("tasks/{task_id}/assignment"),
                &AssignmentUpdate::from(assignment),
            )
            .await
            .map_err(|err| map_api_error(err, Some(task_id)))
    }

    async fn delete_task(&self, task_id: TaskId) -> TaskGatewayResult<()> {
        self.api
            .send_empty(Method::DELETE, &format!("tasks/{task_id}"))
            .await
            .map_err(|err| map_api_error(err, Some(task_id)))
    }
}
