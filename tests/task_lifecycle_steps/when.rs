//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use facility_tasks::task::domain::TaskId;
use rstest_bdd_macros::when;

#[when("the employee completes task {id:i64}")]
fn complete_task(world: &mut TaskBoardWorld, id: i64) {
    world.last_result = Some(run_async(world.board.complete_task(TaskId::new(id))));
}

#[when("the employee reopens task {id:i64}")]
fn reopen_task(world: &mut TaskBoardWorld, id: i64) {
    world.last_result = Some(run_async(world.board.reopen_task(TaskId::new(id))));
}

#[when("the employee claims task {id:i64}")]
fn claim_task(world: &mut TaskBoardWorld, id: i64) {
    world.last_result = Some(run_async(world.board.claim_from_pool(TaskId::new(id))));
}

#[when("two completions of task {id:i64} are sent at once")]
fn complete_twice(world: &mut TaskBoardWorld, id: i64) {
    let task_id = TaskId::new(id);
    let board = &world.board;
    let (first, second) = run_async(async {
        tokio::join!(board.complete_task(task_id), board.complete_task(task_id))
    });
    world.concurrent_results = vec![first, second];
}
