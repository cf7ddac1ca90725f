//! Admin-created tasks flowing through the pool to employees.

use std::sync::Arc;

use super::helpers::{ADMIN, ANNEX, Directory, EMPLOYEE, LOBBY, backend, directory};
use facility_tasks::{
    session::domain::LocationId,
    task::{
        domain::{Assignment, NewTask, Priority, TaskStatus},
        services::{TaskAdminError, TaskAdminService, TaskBoard, TaskBoardError},
    },
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pooled_task_is_claimed_and_completed(directory: Directory) -> Result<(), eyre::Report> {
    let admin_session = directory
        .sessions
        .sign_in(directory.admin_token.clone(), Some(LOBBY))
        .await?;
    let employee_session = directory
        .sessions
        .sign_in(directory.employee_token.clone(), None)
        .await?;
    let admin_store = backend(ADMIN, []);
    let employee_store = Arc::new(admin_store.for_viewer(EMPLOYEE));

    let admin = TaskAdminService::new(
        Arc::clone(&admin_store),
        Arc::new(DefaultClock),
        &admin_session,
    );
    let created = admin
        .create_task(NewTask::new("Replace filters", LOBBY)?.with_priority(Priority::Urgent))
        .await?;
    eyre::ensure!(created.is_pooled(), "new task should be pooled");

    let board = TaskBoard::new(employee_store, Arc::new(DefaultClock), &employee_session);
    board.refresh().await?;
    eyre::ensure!(board.pool().len() == 1, "task should be in the pool");

    let claimed = board.claim_from_pool(created.id()).await?;
    eyre::ensure!(claimed.assigned_to() == Some(EMPLOYEE), "claim should assign employee");
    board.complete_task(created.id()).await?;

    let listed = admin.list_location_tasks(LOBBY).await?;
    let stored = listed
        .iter()
        .find(|task| task.id() == created.id())
        .ok_or_else(|| eyre::eyre!("task missing from location listing"))?;
    eyre::ensure!(stored.status() == TaskStatus::Completed, "admin should see completion");
    eyre::ensure!(stored.priority() == Priority::Urgent, "priority should survive");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_claimed_elsewhere_is_rejected(directory: Directory) -> Result<(), eyre::Report> {
    let admin_session = directory
        .sessions
        .sign_in(directory.admin_token.clone(), Some(LOBBY))
        .await?;
    let employee_session = directory
        .sessions
        .sign_in(directory.employee_token.clone(), None)
        .await?;
    let admin_store = backend(ADMIN, []);
    let admin = TaskAdminService::new(
        Arc::clone(&admin_store),
        Arc::new(DefaultClock),
        &admin_session,
    );
    let created = admin.create_task(NewTask::new("Wipe counters", LOBBY)?).await?;

    let board = TaskBoard::new(
        Arc::new(admin_store.for_viewer(EMPLOYEE)),
        Arc::new(DefaultClock),
        &employee_session,
    );
    board.refresh().await?;
    let before = board.snapshot();
    admin
        .assign_task(&created, Assignment::User(ADMIN))
        .await?;

    let result = board.claim_from_pool(created.id()).await;

    eyre::ensure!(
        matches!(result, Err(TaskBoardError::Gateway(_))),
        "expected backend rejection, got {result:?}"
    );
    eyre::ensure!(board.snapshot() == before, "local state should be unchanged");
    board.refresh_pool().await?;
    eyre::ensure!(board.pool().is_empty(), "pool should be empty after refresh");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_cannot_manage_foreign_location(directory: Directory) -> Result<(), eyre::Report> {
    let session = directory
        .sessions
        .sign_in(directory.admin_token.clone(), Some(ANNEX))
        .await?;
    eyre::ensure!(session.selected_location() == ANNEX, "preferred location honoured");
    let admin = TaskAdminService::new(backend(ADMIN, []), Arc::new(DefaultClock), &session);

    let result = admin
        .create_task(NewTask::new("Audit", LocationId::new(99))?)
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskAdminError::LocationNotPermitted(_))),
        "expected location refusal, got {result:?}"
    );
    Ok(())
}
