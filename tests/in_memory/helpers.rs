//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use chrono::Utc;
use facility_tasks::{
    session::{
        adapters::InMemoryIdentityGateway,
        domain::{CompanyId, LocationId, Role, SessionToken, UserId, Viewer},
        services::SessionService,
    },
    task::{
        adapters::InMemoryTaskGateway,
        domain::{Assignment, Priority, Task, TaskData, TaskId, TaskSource, TaskStatus},
    },
};
use rstest::fixture;

/// Facility both test users work at.
pub const LOBBY: LocationId = LocationId::new(3);
/// Second facility only the admin manages.
pub const ANNEX: LocationId = LocationId::new(4);
/// Employee user id.
pub const EMPLOYEE: UserId = UserId::new(10);
/// Admin user id.
pub const ADMIN: UserId = UserId::new(2);

/// Identity backend plus tokens for both test users.
pub struct Directory {
    pub identity: Arc<InMemoryIdentityGateway>,
    pub sessions: SessionService<InMemoryIdentityGateway>,
    pub employee_token: SessionToken,
    pub admin_token: SessionToken,
}

/// Builds a token, failing the test on a blank value.
pub fn token(raw: &str) -> SessionToken {
    SessionToken::new(raw).expect("valid token")
}

/// Provides an identity backend with one employee and one admin.
#[fixture]
pub fn directory() -> Directory {
    let identity = Arc::new(InMemoryIdentityGateway::new());
    let employee_token = token("employee-token");
    let admin_token = token("admin-token");
    identity
        .register_user(
            &employee_token,
            Viewer::new(EMPLOYEE, Role::Employee)
                .with_company(CompanyId::new(1))
                .with_locations([LOBBY]),
        )
        .expect("register employee");
    identity
        .register_user(
            &admin_token,
            Viewer::new(ADMIN, Role::Admin)
                .with_company(CompanyId::new(1))
                .with_locations([LOBBY, ANNEX]),
        )
        .expect("register admin");
    Directory {
        sessions: SessionService::new(Arc::clone(&identity)),
        identity,
        employee_token,
        admin_token,
    }
}

/// Builds a stored task.
pub fn stored_task(
    id: i64,
    status: TaskStatus,
    assignment: Assignment,
    location: LocationId,
) -> Task {
    let now = Utc::now();
    Task::from_data(TaskData {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        description: None,
        due_date: None,
        priority: Priority::default(),
        location_id: location,
        status,
        assignment,
        created_at: now,
        completed_at: (status == TaskStatus::Completed).then_some(now),
        last_edited_at: None,
        creator_id: ADMIN,
        source: TaskSource::default(),
    })
    .expect("valid task")
}

/// Provides a task backend answering for `viewer`, seeded with `tasks`.
pub fn backend(viewer: UserId, tasks: impl IntoIterator<Item = Task>) -> Arc<InMemoryTaskGateway> {
    let gateway = Arc::new(InMemoryTaskGateway::new(viewer));
    for task in tasks {
        gateway.insert(task).expect("seed task");
    }
    gateway
}
