//! The task lifecycle engine bound to one viewer session.

use super::{TaskBoardError, TaskBoardResult};
use crate::{
    session::domain::{LocationId, Session, Viewer},
    task::{
        domain::{Task, TaskDomainError, TaskId, TaskSet, Transition},
        ports::TaskGateway,
    },
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct BoardState {
    location_id: LocationId,
    tasks: TaskSet,
    in_flight: HashMap<TaskId, Transition>,
    closed: bool,
}

/// The state lock is never held across an await or a panic-prone call, so a
/// poisoned lock still guards consistent data.
fn lock(state: &Mutex<BoardState>) -> MutexGuard<'_, BoardState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Busy marker for one task; cleared when dropped, whatever the outcome.
struct InFlightGuard {
    state: Arc<Mutex<BoardState>>,
    task_id: TaskId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.state).in_flight.remove(&self.task_id);
    }
}

fn apply(
    task: &mut Task,
    transition: Transition,
    viewer: &Viewer,
    clock: &impl Clock,
) -> Result<(), TaskDomainError> {
    match transition {
        Transition::Claim => task.claim(viewer.user_id(), clock),
        Transition::Complete => task.complete(clock),
        Transition::Reopen => task.reopen(clock),
    }
}

/// Viewer-scoped task lifecycle engine.
///
/// Local state changes only after the remote API confirms a transition.
/// Each task id has at most one transition in flight; different ids proceed
/// concurrently.
#[derive(Clone)]
pub struct TaskBoard<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
    viewer: Viewer,
    state: Arc<Mutex<BoardState>>,
}

impl<G, C> TaskBoard<G, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates an empty board for the session's viewer and selected
    /// location. Call [`Self::refresh`] to load tasks.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>, session: &Session) -> Self {
        Self {
            gateway,
            clock,
            viewer: session.viewer().clone(),
            state: Arc::new(Mutex::new(BoardState {
                location_id: session.selected_location(),
                tasks: TaskSet::default(),
                in_flight: HashMap::new(),
                closed: false,
            })),
        }
    }

    /// Returns the viewer the board works for.
    #[must_use]
    pub const fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Returns the location whose pool is shown.
    #[must_use]
    pub fn location_id(&self) -> LocationId {
        lock(&self.state).location_id
    }

    /// Returns a copy of the current partition.
    #[must_use]
    pub fn snapshot(&self) -> TaskSet {
        lock(&self.state).tasks.clone()
    }

    /// Returns the viewer's pending and in-progress tasks.
    #[must_use]
    pub fn pending(&self) -> Vec<Task> {
        lock(&self.state).tasks.pending().to_vec()
    }

    /// Returns the viewer's completed tasks.
    #[must_use]
    pub fn completed(&self) -> Vec<Task> {
        lock(&self.state).tasks.completed().to_vec()
    }

    /// Returns the claimable tasks at the selected location.
    #[must_use]
    pub fn pool(&self) -> Vec<Task> {
        lock(&self.state).tasks.pool().to_vec()
    }

    /// Returns the transition outstanding for `task_id`, if any.
    #[must_use]
    pub fn in_flight(&self, task_id: TaskId) -> Option<Transition> {
        lock(&self.state).in_flight.get(&task_id).copied()
    }

    /// Returns `true` once [`Self::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    /// Tears the board down. Responses arriving afterwards are discarded.
    pub fn close(&self) {
        let mut state = lock(&self.state);
        state.closed = true;
        state.tasks = TaskSet::default();
        tracing::debug!(user_id = %self.viewer.user_id(), "task board closed");
    }

    /// Reloads the viewer's tasks and the selected location's pool.
    ///
    /// The two lists come from separate fetches: pending and completed are
    /// viewer-scoped, the pool is location-scoped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Closed`] after teardown or
    /// [`TaskBoardError::Gateway`] when either fetch fails; the current
    /// partition is kept on failure.
    pub async fn refresh(&self) -> TaskBoardResult<()> {
        let location_id = self.open_location()?;
        let viewer_tasks = self
            .gateway
            .list_viewer_tasks()
            .await
            .inspect_err(|error| tracing::warn!(%error, "failed to fetch viewer tasks"))?;
        let pooled_tasks = self
            .gateway
            .list_pooled_tasks(location_id)
            .await
            .inspect_err(|error| {
                tracing::warn!(location_id = %location_id, %error, "failed to fetch pooled tasks");
            })?;

        let mut state = lock(&self.state);
        if state.closed {
            return Err(TaskBoardError::Closed);
        }
        let pool = if state.location_id == location_id {
            pooled_tasks
        } else {
            Vec::new()
        };
        state.tasks = TaskSet::partition(viewer_tasks, pool, state.location_id);
        tracing::debug!(
            pending = state.tasks.pending().len(),
            completed = state.tasks.completed().len(),
            pool = state.tasks.pool().len(),
            "task board refreshed"
        );
        Ok(())
    }

    /// Reloads the selected location's pool only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Closed`] after teardown or
    /// [`TaskBoardError::Gateway`] when the fetch fails.
    pub async fn refresh_pool(&self) -> TaskBoardResult<()> {
        let location_id = self.open_location()?;
        let pooled_tasks = self
            .gateway
            .list_pooled_tasks(location_id)
            .await
            .inspect_err(|error| {
                tracing::warn!(location_id = %location_id, %error, "failed to fetch pooled tasks");
            })?;

        let mut state = lock(&self.state);
        if state.closed {
            return Err(TaskBoardError::Closed);
        }
        if state.location_id == location_id {
            state.tasks.replace_pool(pooled_tasks, location_id);
        }
        Ok(())
    }

    /// Switches the pool to another location and reloads it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::LocationNotPermitted`] when the viewer may
    /// not operate there, otherwise the errors of [`Self::refresh_pool`].
    pub async fn select_location(&self, location_id: LocationId) -> TaskBoardResult<()> {
        if !self.viewer.can_access_location(location_id) {
            tracing::warn!(location_id = %location_id, "location switch refused");
            return Err(TaskBoardError::LocationNotPermitted(location_id));
        }
        {
            let mut state = lock(&self.state);
            if state.closed {
                return Err(TaskBoardError::Closed);
            }
            state.location_id = location_id;
            state.tasks.clear_pool();
        }
        tracing::info!(location_id = %location_id, "task board location selected");
        self.refresh_pool().await
    }

    /// Marks a pending or in-progress task completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotPending`] (before any remote call) when
    /// the task is not in the pending bucket, [`TaskBoardError::Busy`] while
    /// another transition for it is outstanding, and
    /// [`TaskBoardError::Gateway`] when the remote update fails. Local state
    /// is unchanged on every error.
    pub async fn complete_task(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.run(task_id, Transition::Complete).await
    }

    /// Relists a completed task as pending.
    ///
    /// # Errors
    ///
    /// As [`Self::complete_task`], with [`TaskBoardError::NotCompleted`] for
    /// tasks outside the completed bucket.
    pub async fn reopen_task(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.run(task_id, Transition::Reopen).await
    }

    /// Claims a pooled task for the viewer.
    ///
    /// The task moves to the pending bucket, in progress and assigned to the
    /// viewer. The pool is not refetched.
    ///
    /// # Errors
    ///
    /// As [`Self::complete_task`], with [`TaskBoardError::NotInPool`] for
    /// tasks outside the pool, and [`TaskBoardError::LocationNotPermitted`]
    /// when the viewer may not work at the selected location.
    pub async fn claim_from_pool(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.run(task_id, Transition::Claim).await
    }

    async fn run(&self, task_id: TaskId, transition: Transition) -> TaskBoardResult<Task> {
        let _guard = self.begin(task_id, transition)?;

        let remote = match transition {
            Transition::Claim => {
                self.gateway
                    .claim_task(task_id, self.viewer.user_id())
                    .await
            }
            Transition::Complete | Transition::Reopen => {
                self.gateway
                    .set_status(task_id, transition.target_status())
                    .await
            }
        };
        if let Err(error) = remote {
            tracing::warn!(
                task_id = %task_id,
                %transition,
                %error,
                "remote update failed; task left unchanged"
            );
            return Err(error.into());
        }

        self.commit(task_id, transition)
    }

    /// Checks preconditions and registers the busy marker.
    fn begin(&self, task_id: TaskId, transition: Transition) -> TaskBoardResult<InFlightGuard> {
        let mut state = lock(&self.state);
        if state.closed {
            return Err(TaskBoardError::Closed);
        }
        if let Some(active) = state.in_flight.get(&task_id).copied() {
            tracing::warn!(task_id = %task_id, %transition, %active, "transition already in flight");
            return Err(TaskBoardError::Busy { task_id, active });
        }
        if transition == Transition::Claim && !self.viewer.can_access_location(state.location_id) {
            return Err(TaskBoardError::LocationNotPermitted(state.location_id));
        }
        let Some(task) = state.tasks.get(transition.source(), task_id) else {
            tracing::warn!(task_id = %task_id, %transition, "task not in expected bucket");
            return Err(TaskBoardError::missing_from(transition, task_id));
        };
        let mut probe = task.clone();
        apply(&mut probe, transition, &self.viewer, &*self.clock)?;

        state.in_flight.insert(task_id, transition);
        Ok(InFlightGuard {
            state: Arc::clone(&self.state),
            task_id,
        })
    }

    /// Applies a confirmed transition to the local set.
    fn commit(&self, task_id: TaskId, transition: Transition) -> TaskBoardResult<Task> {
        let mut state = lock(&self.state);
        if state.closed {
            tracing::debug!(task_id = %task_id, %transition, "discarding response after teardown");
            return Err(TaskBoardError::Closed);
        }

        let moved = state.tasks.relocate(
            task_id,
            transition.source(),
            transition.target(),
            |task| apply(task, transition, &self.viewer, &*self.clock),
        );
        match moved {
            Ok(task) => {
                tracing::debug!(task_id = %task_id, %transition, "transition committed");
                Ok(task)
            }
            Err(error) => {
                // A refresh landed while the request was in flight.
                if let Some(task) = state.tasks.get(transition.target(), task_id) {
                    return Ok(task.clone());
                }
                tracing::warn!(
                    task_id = %task_id,
                    %transition,
                    %error,
                    "local view moved on after the backend confirmed the update"
                );
                Err(TaskBoardError::Superseded {
                    task_id,
                    transition,
                })
            }
        }
    }

    fn open_location(&self) -> TaskBoardResult<LocationId> {
        let state = lock(&self.state);
        if state.closed {
            return Err(TaskBoardError::Closed);
        }
        Ok(state.location_id)
    }
}
