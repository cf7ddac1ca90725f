//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_bucket};
use facility_tasks::task::{
    domain::{TaskId, TaskStatus},
    services::{FailureKind, TaskBoardError},
};
use rstest_bdd_macros::then;

#[then("task {id:i64} is in the {bucket} list")]
fn task_in_bucket(world: &TaskBoardWorld, id: i64, bucket: String) -> Result<(), eyre::Report> {
    let expected = parse_bucket(&bucket)?;
    eyre::ensure!(
        world.holds(expected, TaskId::new(id)),
        "task {id} missing from the {bucket} list"
    );
    Ok(())
}

#[then("task {id:i64} is not in the {bucket} list")]
fn task_not_in_bucket(world: &TaskBoardWorld, id: i64, bucket: String) -> Result<(), eyre::Report> {
    let excluded = parse_bucket(&bucket)?;
    eyre::ensure!(
        !world.holds(excluded, TaskId::new(id)),
        "task {id} unexpectedly in the {bucket} list"
    );
    Ok(())
}

#[then(r#"task {id:i64} has status "{status}""#)]
fn task_has_status(world: &TaskBoardWorld, id: i64, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let snapshot = world.board.snapshot();
    let task_id = TaskId::new(id);
    let task = snapshot
        .bucket_of(task_id)
        .and_then(|bucket| snapshot.get(bucket, task_id))
        .ok_or_else(|| eyre::eyre!("task {id} not on the board"))?;
    eyre::ensure!(
        task.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        task.status().as_str()
    );
    Ok(())
}

#[then("the failure is classified as {kind}")]
fn failure_classified_as(world: &TaskBoardWorld, kind: String) -> Result<(), eyre::Report> {
    let expected = match kind.as_str() {
        "precondition" => FailureKind::Precondition,
        "authorization" => FailureKind::Authorization,
        "rejected" => FailureKind::Rejected,
        "transient" => FailureKind::Transient,
        "stale" => FailureKind::Stale,
        other => return Err(eyre::eyre!("unknown failure kind {other:?} in scenario")),
    };
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    match result {
        Err(error) if error.failure_kind() == expected => Ok(()),
        other => Err(eyre::eyre!("expected a {kind} failure, got {other:?}")),
    }
}

#[then("one attempt fails as busy")]
fn one_attempt_busy(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let busy = world
        .concurrent_results
        .iter()
        .filter(|result| matches!(result, Err(TaskBoardError::Busy { .. })))
        .count();
    let succeeded = world
        .concurrent_results
        .iter()
        .filter(|result| result.is_ok())
        .count();
    eyre::ensure!(
        busy == 1 && succeeded == 1,
        "expected one success and one busy refusal, got {:?}",
        world.concurrent_results
    );
    Ok(())
}

#[then("the backend received {count:usize} updates")]
fn backend_received(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world
        .gateway
        .mutation_calls()
        .map_err(|err| eyre::eyre!("read mutation calls: {err}"))?;
    eyre::ensure!(calls == count, "expected {count} updates, backend saw {calls}");
    Ok(())
}
