//! HTTP adapter tests against a local mock API server.

use std::sync::Arc;

use facility_tasks::{
    api::ApiClient,
    config::ApiConfig,
    session::{
        adapters::HttpIdentityGateway,
        domain::{LocationId, Role, SessionToken, UserId},
        ports::{IdentityGateway, IdentityGatewayError},
        services::SessionService,
    },
    task::{
        adapters::HttpTaskGateway,
        domain::{Assignment, NewTask, TaskId, TaskStatus},
        ports::{TaskGateway, TaskGatewayError},
        services::{FailureKind, TaskBoard},
    },
};
use mockable::DefaultClock;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const TOKEN: &str = "employee-token";
const BEARER: &str = "Bearer employee-token";

fn client(server: &ServerGuard) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("{}/api", server.url()),
        timeout_secs: 5,
    };
    ApiClient::new(&config).expect("valid client")
}

fn token() -> SessionToken {
    SessionToken::new(TOKEN).expect("valid token")
}

fn task_json(
    id: i64,
    status: &str,
    is_pooled: bool,
    assigned_to: Option<i64>,
) -> serde_json::Value {
    json!({
        "task_id": id,
        "title": format!("Task {id}"),
        "location_id": 3,
        "status": status,
        "is_pooled": is_pooled,
        "assigned_to": assigned_to,
        "created_timestamp": "2024-05-01T08:00:00Z",
        "completed_timestamp": if status == "completed" { json!("2024-05-02T08:00:00Z") } else { json!(null) },
        "creator_id": 1
    })
}

async fn mock_user(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/api/users/me")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "user_id": 9,
                "role": "Employee",
                "company_id": 1,
                "location_ids": [3],
                "fname": "Ada",
                "lname": "Lovelace"
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_user_accepts_legacy_name_fields() {
    let mut server = Server::new_async().await;
    let mock = mock_user(&mut server).await;
    let identity = HttpIdentityGateway::new(client(&server));

    let viewer = identity.fetch_user(&token()).await.expect("user fetched");

    mock.assert_async().await;
    assert_eq!(viewer.user_id(), UserId::new(9));
    assert_eq!(viewer.role(), Role::Employee);
    assert_eq!(viewer.name().first(), "Ada");
    assert_eq!(viewer.name().last(), "Lovelace");
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_token_is_unauthorized() {
    let mut server = Server::new_async().await;
    let _unauthorized = server
        .mock("GET", "/api/users/me")
        .with_status(401)
        .with_body(r#"{"detail":"token expired"}"#)
        .create_async()
        .await;
    let identity = HttpIdentityGateway::new(client(&server));

    let result = identity.fetch_user(&token()).await;

    assert!(matches!(result, Err(IdentityGatewayError::Unauthorized)));
}

#[tokio::test(flavor = "multi_thread")]
async fn task_lists_normalize_legacy_statuses() {
    let mut server = Server::new_async().await;
    let body = json!({
        "tasks": [
            task_json(1, "open", false, Some(9)),
            task_json(2, "In Progress", false, Some(9)),
            task_json(3, "completed", false, Some(9))
        ]
    });
    let _mine = server
        .mock("GET", "/api/tasks/mine")
        .match_header("authorization", BEARER)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;
    let gateway = HttpTaskGateway::new(client(&server).with_token(&token()));

    let tasks = gateway.list_viewer_tasks().await.expect("tasks listed");

    let statuses: Vec<TaskStatus> = tasks.iter().map(|task| task.status()).collect();
    assert_eq!(
        statuses,
        vec![TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_is_an_invalid_response() {
    let mut server = Server::new_async().await;
    let _pooled = server
        .mock("GET", "/api/locations/3/tasks/pooled")
        .with_status(200)
        .with_body(json!({ "tasks": [task_json(7, "archived", true, None)] }).to_string())
        .create_async()
        .await;
    let gateway = HttpTaskGateway::new(client(&server).with_token(&token()));

    let result = gateway.list_pooled_tasks(LocationId::new(3)).await;

    assert!(matches!(result, Err(TaskGatewayError::InvalidResponse(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn writes_use_canonical_vocabulary() {
    let mut server = Server::new_async().await;
    let status = server
        .mock("PATCH", "/api/tasks/42/status")
        .match_header("authorization", BEARER)
        .match_body(Matcher::Json(json!({ "status": "completed" })))
        .with_status(204)
        .create_async()
        .await;
    let claim = server
        .mock("POST", "/api/tasks/7/claim")
        .match_body(Matcher::Json(json!({ "user_id": 9 })))
        .with_status(204)
        .create_async()
        .await;
    let assign = server
        .mock("PATCH", "/api/tasks/5/assignment")
        .match_body(Matcher::Json(json!({ "is_pooled": true, "assigned_to": null })))
        .with_status(204)
        .create_async()
        .await;
    let gateway = HttpTaskGateway::new(client(&server).with_token(&token()));

    gateway
        .set_status(TaskId::new(42), TaskStatus::Completed)
        .await
        .expect("status set");
    gateway
        .claim_task(TaskId::new(7), UserId::new(9))
        .await
        .expect("task claimed");
    gateway
        .assign_task(TaskId::new(5), Assignment::Pooled)
        .await
        .expect("task pooled");

    status.assert_async().await;
    claim.assert_async().await;
    assign.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_returns_stored_task() {
    let mut server = Server::new_async().await;
    let _created = server
        .mock("POST", "/api/tasks")
        .match_body(Matcher::PartialJson(json!({
            "title": "Replace filters",
            "location_id": 3,
            "is_pooled": true
        })))
        .with_status(201)
        .with_body(task_json(11, "pending", true, None).to_string())
        .create_async()
        .await;
    let gateway = HttpTaskGateway::new(client(&server).with_token(&token()));
    let request = NewTask::new("Replace filters", LocationId::new(3)).expect("valid task");

    let created = gateway.create_task(&request).await.expect("task created");

    assert_eq!(created.id(), TaskId::new(11));
    assert!(created.is_pooled());
}

#[tokio::test(flavor = "multi_thread")]
async fn conflict_message_is_surfaced() {
    let mut server = Server::new_async().await;
    let _conflict = server
        .mock("POST", "/api/tasks/7/claim")
        .with_status(409)
        .with_body(r#"{"message":"task already claimed"}"#)
        .create_async()
        .await;
    let gateway = HttpTaskGateway::new(client(&server).with_token(&token()));

    let result = gateway.claim_task(TaskId::new(7), UserId::new(9)).await;

    assert!(matches!(
        result,
        Err(TaskGatewayError::Rejected(ref message)) if message == "task already claimed"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn board_over_http_keeps_state_on_server_error() {
    let mut server = Server::new_async().await;
    let _user = mock_user(&mut server).await;
    let _mine_list = server
        .mock("GET", "/api/tasks/mine")
        .with_status(200)
        .with_body(json!({ "tasks": [task_json(42, "pending", false, Some(9))] }).to_string())
        .create_async()
        .await;
    let _pool_list = server
        .mock("GET", "/api/locations/3/tasks/pooled")
        .with_status(200)
        .with_body(json!({ "tasks": [task_json(7, "pending", true, None)] }).to_string())
        .create_async()
        .await;
    let _status_failure = server
        .mock("PATCH", "/api/tasks/42/status")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;
    let api = client(&server);
    let sessions = SessionService::new(Arc::new(HttpIdentityGateway::new(api.clone())));
    let session = sessions.sign_in(token(), None).await.expect("signed in");
    let gateway = HttpTaskGateway::new(api.with_token(session.token()));
    let board = TaskBoard::new(Arc::new(gateway), Arc::new(DefaultClock), &session);
    board.refresh().await.expect("refresh should succeed");
    let before = board.snapshot();

    let error = board
        .complete_task(TaskId::new(42))
        .await
        .expect_err("server error expected");

    assert_eq!(error.failure_kind(), FailureKind::Transient);
    assert_eq!(board.snapshot(), before);
    assert_eq!(board.pool().len(), 1);
}
