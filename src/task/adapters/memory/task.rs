//! In-memory backend standing in for the remote task store.

use async_trait::async_trait;
use chrono::Utc;
use mockable::DefaultClock;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::{
    session::domain::{LocationId, UserId},
    task::{
        domain::{
            Assignment, NewTask, Task, TaskData, TaskDomainError, TaskId, TaskSource, TaskStatus,
        },
        ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
    },
};

/// Thread-safe in-memory task store bound to one viewer.
///
/// Mutations can be delayed and failures injected so callers can exercise
/// in-flight and error paths deterministically.
#[derive(Debug, Clone)]
pub struct InMemoryTaskGateway {
    viewer: UserId,
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    next_id: i64,
    latency: Option<Duration>,
    injected_failures: VecDeque<TaskGatewayError>,
    mutation_calls: usize,
}

fn lock_error(err: impl ToString) -> TaskGatewayError {
    TaskGatewayError::transport(std::io::Error::other(err.to_string()))
}

fn rejected(err: &TaskDomainError) -> TaskGatewayError {
    TaskGatewayError::Rejected(err.to_string())
}

impl InMemoryTaskGateway {
    /// Creates an empty store answering for `viewer`.
    #[must_use]
    pub fn new(viewer: UserId) -> Self {
        Self {
            viewer,
            state: Arc::new(RwLock::new(InMemoryTaskState {
                next_id: 1,
                ..InMemoryTaskState::default()
            })),
        }
    }

    /// Returns a handle onto the same store answering for `viewer`.
    #[must_use]
    pub fn for_viewer(&self, viewer: UserId) -> Self {
        Self {
            viewer,
            state: Arc::clone(&self.state),
        }
    }

    /// Adds or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn insert(&self, task: Task) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.next_id = state.next_id.max(task.id().value().saturating_add(1));
        match state.tasks.iter_mut().find(|stored| stored.id() == task.id()) {
            Some(stored) => *stored = task,
            None => state.tasks.push(task),
        }
        Ok(())
    }

    /// Delays every subsequent mutation by `latency`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_latency(&self, latency: Duration) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.latency = Some(latency);
        Ok(())
    }

    /// Makes the next mutation fail with `error` without touching the store.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_next(&self, error: TaskGatewayError) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.injected_failures.push_back(error);
        Ok(())
    }

    /// Returns how many mutations have been requested so far.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn mutation_calls(&self) -> TaskGatewayResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.mutation_calls)
    }

    /// Returns the stored copy of a task.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn stored(&self, task_id: TaskId) -> TaskGatewayResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.iter().find(|task| task.id() == task_id).cloned())
    }

    fn list_where(&self, predicate: impl Fn(&Task) -> bool) -> TaskGatewayResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.iter().filter(|task| predicate(task)).cloned().collect())
    }

    /// Counts the call, honours injected failures and latency.
    async fn begin_mutation(&self) -> TaskGatewayResult<()> {
        let latency = {
            let mut state = self.state.write().map_err(lock_error)?;
            state.mutation_calls += 1;
            if let Some(error) = state.injected_failures.pop_front() {
                return Err(error);
            }
            state.latency
        };
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    fn update(
        &self,
        task_id: TaskId,
        apply: impl FnOnce(&mut Task) -> TaskGatewayResult<()>,
    ) -> TaskGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or(TaskGatewayError::NotFound(task_id))?;
        let mut updated = stored.clone();
        apply(&mut updated)?;
        *stored = updated;
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list_viewer_tasks(&self) -> TaskGatewayResult<Vec<Task>> {
        let viewer = self.viewer;
        self.list_where(|task| task.assigned_to() == Some(viewer))
    }

    async fn list_pooled_tasks(&self, location_id: LocationId) -> TaskGatewayResult<Vec<Task>> {
        self.list_where(|task| task.is_pooled() && task.location_id() == location_id)
    }

    async fn set_status(&self, task_id: TaskId, status: TaskStatus) -> TaskGatewayResult<()> {
        self.begin_mutation().await?;
        self.update(task_id, |task| match status {
            TaskStatus::Completed => task.complete(&DefaultClock).map_err(|err| rejected(&err)),
            TaskStatus::Pending => task.reopen(&DefaultClock).map_err(|err| rejected(&err)),
            TaskStatus::InProgress => Err(TaskGatewayError::Rejected(
                "tasks start through a claim".to_owned(),
            )),
        })
    }

    async fn claim_task(&self, task_id: TaskId, user_id: UserId) -> TaskGatewayResult<()> {
        self.begin_mutation().await?;
        self.update(task_id, |task| {
            if !task.is_pooled() {
                return Err(TaskGatewayError::Rejected(format!(
                    "task {task_id} has already been claimed"
                )));
            }
            task.claim(user_id, &DefaultClock)
                .map_err(|err| rejected(&err))
        })
    }

    async fn list_location_tasks(&self, location_id: LocationId) -> TaskGatewayResult<Vec<Task>> {
        self.list_where(|task| task.location_id() == location_id)
    }

    async fn create_task(&self, new_task: &NewTask) -> TaskGatewayResult<Task> {
        self.begin_mutation().await?;
        let mut state = self.state.write().map_err(lock_error)?;
        let id = TaskId::new(state.next_id);
        state.next_id = state.next_id.saturating_add(1);
        let task = Task::from_data(TaskData {
            id,
            title: new_task.title().to_owned(),
            description: new_task.description().map(str::to_owned),
            due_date: new_task.due_date(),
            priority: new_task.priority(),
            location_id: new_task.location_id(),
            status: TaskStatus::Pending,
            assignment: new_task.assignment(),
            created_at: Utc::now(),
            completed_at: None,
            last_edited_at: None,
            creator_id: self.viewer,
            source: TaskSource::default(),
        })
        .map_err(|err| rejected(&err))?;
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn assign_task(&self, task_id: TaskId, assignment: Assignment) -> TaskGatewayResult<()> {
        self.begin_mutation().await?;
        self.update(task_id, |task| {
            task.reassign(assignment, &DefaultClock)
                .map_err(|err| rejected(&err))
        })
    }

    async fn delete_task(&self, task_id: TaskId) -> TaskGatewayResult<()> {
        self.begin_mutation().await?;
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != task_id);
        if state.tasks.len() == before {
            return Err(TaskGatewayError::NotFound(task_id));
        }
        Ok(())
    }
}
