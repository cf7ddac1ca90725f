//! Per-viewer partition of tasks into pending, completed and pool views.

use super::{Task, TaskDomainError, TaskId};
use crate::session::domain::LocationId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One of the three disjoint views of a [`TaskSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Viewer's tasks that are pending or in progress.
    Pending,
    /// Viewer's completed tasks.
    Completed,
    /// Unassigned tasks at the selected location.
    Pool,
}

impl Bucket {
    /// Returns the bucket name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Pool => "pool",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The viewer's working set.
///
/// Pending and completed come from the viewer-scoped fetch and keep arrival
/// order. The pool comes from a separate location-scoped fetch. No task id
/// appears in more than one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    pending: Vec<Task>,
    completed: Vec<Task>,
    pool: Vec<Task>,
}

impl TaskSet {
    /// Partitions the two fetches into the three views.
    ///
    /// Viewer tasks split by status. Pool entries are kept only when they
    /// are pooled, belong to `location_id` and are not already among the
    /// viewer's tasks.
    #[must_use]
    pub fn partition(
        viewer_tasks: impl IntoIterator<Item = Task>,
        pooled_tasks: impl IntoIterator<Item = Task>,
        location_id: LocationId,
    ) -> Self {
        let (pending, completed): (Vec<Task>, Vec<Task>) = viewer_tasks
            .into_iter()
            .partition(|task| task.status().is_open());
        let mut set = Self {
            pending,
            completed,
            pool: Vec::new(),
        };
        set.replace_pool(pooled_tasks, location_id);
        set
    }

    /// Replaces the pool view, leaving the viewer-scoped views untouched.
    pub fn replace_pool(
        &mut self,
        pooled_tasks: impl IntoIterator<Item = Task>,
        location_id: LocationId,
    ) {
        let mut seen: HashSet<TaskId> = self
            .pending
            .iter()
            .chain(&self.completed)
            .map(Task::id)
            .collect();
        self.pool = pooled_tasks
            .into_iter()
            .filter(|task| task.is_pooled() && task.location_id() == location_id)
            .filter(|task| seen.insert(task.id()))
            .collect();
    }

    /// Drops the pool view.
    pub fn clear_pool(&mut self) {
        self.pool.clear();
    }

    /// Returns the viewer's pending and in-progress tasks.
    #[must_use]
    pub fn pending(&self) -> &[Task] {
        &self.pending
    }

    /// Returns the viewer's completed tasks.
    #[must_use]
    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    /// Returns the claimable tasks at the selected location.
    #[must_use]
    pub fn pool(&self) -> &[Task] {
        &self.pool
    }

    /// Returns the tasks in `bucket`.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Pending => &self.pending,
            Bucket::Completed => &self.completed,
            Bucket::Pool => &self.pool,
        }
    }

    const fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Task> {
        match bucket {
            Bucket::Pending => &mut self.pending,
            Bucket::Completed => &mut self.completed,
            Bucket::Pool => &mut self.pool,
        }
    }

    /// Returns the bucket holding `task_id`, if any.
    #[must_use]
    pub fn bucket_of(&self, task_id: TaskId) -> Option<Bucket> {
        [Bucket::Pending, Bucket::Completed, Bucket::Pool]
            .into_iter()
            .find(|bucket| self.get(*bucket, task_id).is_some())
    }

    /// Returns the task with `task_id` in `bucket`.
    #[must_use]
    pub fn get(&self, bucket: Bucket, task_id: TaskId) -> Option<&Task> {
        self.bucket(bucket).iter().find(|task| task.id() == task_id)
    }

    /// Returns the total number of tasks across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len() + self.pool.len()
    }

    /// Returns `true` when every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `transition` to the task in `from` and moves it to the end
    /// of `to`.
    ///
    /// The transition runs on a copy; when it fails the set is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotInBucket`] when `from` does not hold the
    /// task, or the transition's own error.
    pub fn relocate<F>(
        &mut self,
        task_id: TaskId,
        from: Bucket,
        to: Bucket,
        transition: F,
    ) -> Result<Task, TaskDomainError>
    where
        F: FnOnce(&mut Task) -> Result<(), TaskDomainError>,
    {
        let source = self.bucket_mut(from);
        let index = source
            .iter()
            .position(|task| task.id() == task_id)
            .ok_or(TaskDomainError::NotInBucket {
                task_id,
                bucket: from,
            })?;
        let mut updated = source
            .get(index)
            .cloned()
            .ok_or(TaskDomainError::NotInBucket {
                task_id,
                bucket: from,
            })?;
        transition(&mut updated)?;

        source.remove(index);
        self.bucket_mut(to).push(updated.clone());
        Ok(updated)
    }
}
