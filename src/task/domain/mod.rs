//! Domain model for the task lifecycle and pooling model.
//!
//! A task moves from the location pool to a viewer's pending list when
//! claimed, to their completed list when finished, and back to pending when
//! relisted. [`TaskSet`] holds the three disjoint views a viewer works with.

mod error;
mod ids;
mod new_task;
mod status;
mod task;
mod task_set;
mod transition;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskSource};
pub use new_task::NewTask;
pub use status::{Priority, TaskStatus};
pub use task::{Assignment, Task, TaskData};
pub use task_set::{Bucket, TaskSet};
pub use transition::Transition;
