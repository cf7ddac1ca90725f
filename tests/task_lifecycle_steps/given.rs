//! Given steps for task board BDD scenarios.

use std::time::Duration;

use super::world::{EMPLOYEE, TaskBoardWorld, backend_task, run_async};
use facility_tasks::task::{
    domain::{Assignment, TaskStatus},
    ports::TaskGatewayError,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("the employee has a pending task {id:i64}")]
fn pending_task(world: &mut TaskBoardWorld, id: i64) -> Result<(), eyre::Report> {
    let task = backend_task(id, TaskStatus::Pending, Assignment::User(EMPLOYEE))?;
    world.gateway.insert(task).wrap_err("seed pending task")?;
    Ok(())
}

#[given("the employee has a completed task {id:i64}")]
fn completed_task(world: &mut TaskBoardWorld, id: i64) -> Result<(), eyre::Report> {
    let task = backend_task(id, TaskStatus::Completed, Assignment::User(EMPLOYEE))?;
    world.gateway.insert(task).wrap_err("seed completed task")?;
    Ok(())
}

#[given("the pool holds task {id:i64}")]
fn pooled_task(world: &mut TaskBoardWorld, id: i64) -> Result<(), eyre::Report> {
    let task = backend_task(id, TaskStatus::Pending, Assignment::Pooled)?;
    world.gateway.insert(task).wrap_err("seed pooled task")?;
    Ok(())
}

#[given("the task board has been refreshed")]
fn board_refreshed(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    run_async(world.board.refresh()).wrap_err("refresh task board")?;
    Ok(())
}

#[given(r#"the backend will fail the next update as "{kind}""#)]
fn backend_fails_next(world: &mut TaskBoardWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = match kind.as_str() {
        "transient" => TaskGatewayError::transport(std::io::Error::other("connection reset")),
        "unauthorized" => TaskGatewayError::Unauthorized,
        "rejected" => TaskGatewayError::Rejected("refused by backend".to_owned()),
        other => return Err(eyre::eyre!("unknown failure kind {other:?} in scenario")),
    };
    world.gateway.fail_next(failure).wrap_err("inject failure")?;
    Ok(())
}

#[given("the backend responds slowly")]
fn backend_slow(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    world
        .gateway
        .set_latency(Duration::from_millis(50))
        .wrap_err("set latency")?;
    Ok(())
}
