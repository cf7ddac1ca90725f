//! Administrator task operations, gated by role and location.

use crate::{
    session::domain::{LocationId, Session, Viewer},
    task::{
        domain::{Assignment, NewTask, Task, TaskDomainError},
        ports::{TaskGateway, TaskGatewayError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for administrator task operations.
#[derive(Debug, Error)]
pub enum TaskAdminError {
    /// The viewer's role does not allow managing tasks.
    #[error("viewer is not allowed to manage tasks")]
    Forbidden,
    /// The viewer does not administer the location.
    #[error("location {0} is not administered by this viewer")]
    LocationNotPermitted(LocationId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The remote call failed.
    #[error(transparent)]
    Gateway(#[from] TaskGatewayError),
}

impl TaskAdminError {
    /// Returns `true` when the caller must send the user back to login.
    #[must_use]
    pub const fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::Gateway(TaskGatewayError::Unauthorized))
    }
}

/// Result type for administrator task operations.
pub type TaskAdminResult<T> = Result<T, TaskAdminError>;

/// Task management for admins and super admins.
#[derive(Clone)]
pub struct TaskAdminService<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
    viewer: Viewer,
}

impl<G, C> TaskAdminService<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates a service acting as the session's viewer.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>, session: &Session) -> Self {
        Self {
            gateway,
            clock,
            viewer: session.viewer().clone(),
        }
    }

    fn authorize(&self, location_id: LocationId) -> TaskAdminResult<()> {
        if !self.viewer.can_manage_tasks() {
            tracing::warn!(user_id = %self.viewer.user_id(), "task management refused for role");
            return Err(TaskAdminError::Forbidden);
        }
        if !self.viewer.can_access_location(location_id) {
            tracing::warn!(location_id = %location_id, "task management refused for location");
            return Err(TaskAdminError::LocationNotPermitted(location_id));
        }
        Ok(())
    }

    /// Lists every task at a location, assigned or not.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAdminError::Forbidden`] or
    /// [`TaskAdminError::LocationNotPermitted`] before any remote call, or
    /// [`TaskAdminError::Gateway`] when the fetch fails.
    pub async fn list_location_tasks(&self, location_id: LocationId) -> TaskAdminResult<Vec<Task>> {
        self.authorize(location_id)?;
        Ok(self.gateway.list_location_tasks(location_id).await?)
    }

    /// Creates a task at the request's location.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAdminError::Forbidden`] or
    /// [`TaskAdminError::LocationNotPermitted`] before any remote call, or
    /// [`TaskAdminError::Gateway`] when the backend refuses the task.
    pub async fn create_task(&self, new_task: NewTask) -> TaskAdminResult<Task> {
        self.authorize(new_task.location_id())?;
        let created = self
            .gateway
            .create_task(&new_task)
            .await
            .inspect_err(|error| tracing::warn!(%error, "task creation failed"))?;
        tracing::info!(task_id = %created.id(), location_id = %created.location_id(), "task created");
        Ok(created)
    }

    /// Moves a task to the pool or to a user and returns the updated copy.
    ///
    /// # Errors
    ///
    /// Returns authorization errors before any remote call, domain errors
    /// for assignments the lifecycle forbids, or
    /// [`TaskAdminError::Gateway`] when the backend refuses the change.
    pub async fn assign_task(&self, task: &Task, assignment: Assignment) -> TaskAdminResult<Task> {
        self.authorize(task.location_id())?;
        let mut updated = task.clone();
        updated.reassign(assignment, &*self.clock)?;
        self.gateway
            .assign_task(task.id(), assignment)
            .await
            .inspect_err(|error| {
                tracing::warn!(task_id = %task.id(), %error, "task assignment failed");
            })?;
        Ok(updated)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns authorization errors before any remote call, or
    /// [`TaskAdminError::Gateway`] when the backend refuses the removal.
    pub async fn remove_task(&self, task: &Task) -> TaskAdminResult<()> {
        self.authorize(task.location_id())?;
        self.gateway
            .delete_task(task.id())
            .await
            .inspect_err(|error| tracing::warn!(task_id = %task.id(), %error, "task removal failed"))?;
        tracing::info!(task_id = %task.id(), "task removed");
        Ok(())
    }
}
