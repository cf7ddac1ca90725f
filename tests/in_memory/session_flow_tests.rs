//! Sign-in through task board integration tests.

use std::sync::Arc;

use super::helpers::{Directory, EMPLOYEE, LOBBY, backend, directory, stored_task, token};
use facility_tasks::{
    session::{ports::IdentityGatewayError, services::SessionError},
    task::{
        domain::{Assignment, TaskId, TaskStatus},
        ports::TaskGatewayError,
        services::{FailureKind, TaskBoard},
    },
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employee_signs_in_and_works_tasks(directory: Directory) -> Result<(), eyre::Report> {
    let session = directory
        .sessions
        .sign_in(directory.employee_token.clone(), None)
        .await?;
    eyre::ensure!(session.selected_location() == LOBBY, "unexpected location");

    let tasks = backend(
        EMPLOYEE,
        [
            stored_task(42, TaskStatus::Pending, Assignment::User(EMPLOYEE), LOBBY),
            stored_task(43, TaskStatus::Completed, Assignment::User(EMPLOYEE), LOBBY),
            stored_task(7, TaskStatus::Pending, Assignment::Pooled, LOBBY),
        ],
    );
    let board = TaskBoard::new(Arc::clone(&tasks), Arc::new(DefaultClock), &session);
    board.refresh().await?;

    board.complete_task(TaskId::new(42)).await?;
    board.claim_from_pool(TaskId::new(7)).await?;
    board.reopen_task(TaskId::new(43)).await?;

    let pending: Vec<i64> = board.pending().iter().map(|t| t.id().value()).collect();
    let completed: Vec<i64> = board.completed().iter().map(|t| t.id().value()).collect();
    eyre::ensure!(pending == vec![7, 43], "pending was {pending:?}");
    eyre::ensure!(completed == vec![42], "completed was {completed:?}");
    eyre::ensure!(board.pool().is_empty(), "pool should be empty");

    board.refresh().await?;
    let mut refreshed: Vec<i64> = board.pending().iter().map(|t| t.id().value()).collect();
    refreshed.sort_unstable();
    eyre::ensure!(refreshed == vec![7, 43], "backend disagrees: {refreshed:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoked_token_requires_reauthentication(directory: Directory) {
    directory
        .identity
        .revoke(&directory.employee_token)
        .expect("revoke token");

    let error = directory
        .sessions
        .sign_in(directory.employee_token.clone(), None)
        .await
        .expect_err("sign-in should fail");

    assert!(matches!(
        error,
        SessionError::Gateway(IdentityGatewayError::Unauthorized)
    ));
    assert!(error.requires_reauthentication());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_token_is_unauthorized(directory: Directory) {
    let result = directory.sessions.sign_in(token("stranger"), None).await;
    assert!(result.is_err_and(|error| error.requires_reauthentication()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_session_surfaces_as_authorization_failure(directory: Directory) {
    let session = directory
        .sessions
        .sign_in(directory.employee_token.clone(), None)
        .await
        .expect("sign-in should succeed");
    let tasks = backend(
        EMPLOYEE,
        [stored_task(42, TaskStatus::Pending, Assignment::User(EMPLOYEE), LOBBY)],
    );
    let board = TaskBoard::new(Arc::clone(&tasks), Arc::new(DefaultClock), &session);
    board.refresh().await.expect("refresh should succeed");
    tasks
        .fail_next(TaskGatewayError::Unauthorized)
        .expect("inject failure");

    let error = board
        .complete_task(TaskId::new(42))
        .await
        .expect_err("completion should fail");

    assert_eq!(error.failure_kind(), FailureKind::Authorization);
    assert_eq!(board.pending().len(), 1);
}
