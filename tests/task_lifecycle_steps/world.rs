//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use chrono::Utc;
use eyre::WrapErr;
use facility_tasks::{
    session::domain::{LocationId, Role, Session, SessionToken, UserId, Viewer},
    task::{
        adapters::InMemoryTaskGateway,
        domain::{Assignment, Bucket, Priority, Task, TaskData, TaskId, TaskSource, TaskStatus},
        services::{TaskBoard, TaskBoardResult},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Board type used by the BDD world.
pub type TestBoard = TaskBoard<InMemoryTaskGateway, DefaultClock>;

/// Employee the scenarios act as.
pub const EMPLOYEE: UserId = UserId::new(9);
/// Location the employee works at.
pub const LOCATION: LocationId = LocationId::new(3);

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub gateway: Arc<InMemoryTaskGateway>,
    pub board: TestBoard,
    pub last_result: Option<TaskBoardResult<Task>>,
    pub concurrent_results: Vec<TaskBoardResult<Task>>,
}

impl TaskBoardWorld {
    /// Creates a world with an empty backend and a signed-in employee.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(InMemoryTaskGateway::new(EMPLOYEE));
        let session = Session::open(
            SessionToken::new("scenario-token").expect("valid token"),
            Viewer::new(EMPLOYEE, Role::Employee).with_locations([LOCATION]),
            LOCATION,
        )
        .expect("session opens");
        let board = TaskBoard::new(Arc::clone(&gateway), Arc::new(DefaultClock), &session);

        Self {
            gateway,
            board,
            last_result: None,
            concurrent_results: Vec::new(),
        }
    }

    /// Returns `true` when the board lists `task_id` in `bucket`.
    #[must_use]
    pub fn holds(&self, bucket: Bucket, task_id: TaskId) -> bool {
        self.board.snapshot().get(bucket, task_id).is_some()
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Builds a backend task at the scenario location.
///
/// # Errors
///
/// Returns an error when the task data is rejected.
pub fn backend_task(
    id: i64,
    status: TaskStatus,
    assignment: Assignment,
) -> Result<Task, eyre::Report> {
    let now = Utc::now();
    Task::from_data(TaskData {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        description: None,
        due_date: None,
        priority: Priority::Medium,
        location_id: LOCATION,
        status,
        assignment,
        created_at: now,
        completed_at: (status == TaskStatus::Completed).then_some(now),
        last_edited_at: None,
        creator_id: UserId::new(1),
        source: TaskSource::default(),
    })
    .wrap_err_with(|| format!("build scenario task {id}"))
}

/// Parses a bucket name used in scenario text.
///
/// # Errors
///
/// Returns an error for names other than pending, completed and pool.
pub fn parse_bucket(name: &str) -> Result<Bucket, eyre::Report> {
    match name {
        "pending" => Ok(Bucket::Pending),
        "completed" => Ok(Bucket::Completed),
        "pool" => Ok(Bucket::Pool),
        other => Err(eyre::eyre!("unknown bucket {other:?} in scenario")),
    }
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
