use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use todo_core::{MemoryStore, Todo, TodoService};
use todo_server::TodoEnvelope;
use tower::ServiceExt;

fn app() -> Router {
    todo_server::app(TodoService::new(MemoryStore::new()))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(get_request("/v1/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = body_json(resp).await;
    assert_eq!(page["todos"], serde_json::json!([]));
    assert_eq!(page["nextPageToken"], "");
}

#[tokio::test]
async fn list_invalid_page_token_returns_400() {
    let resp = app()
        .oneshot(get_request("/v1/todos?pageToken=garbage"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], "invalid_argument");
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_envelope() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/v1/todos",
            r#"{"title":"Test Todo Create","description":"Description for create test"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let envelope: TodoEnvelope = body_json(resp).await;
    assert!(!envelope.todo.id.is_nil());
    assert_eq!(envelope.todo.title, "Test Todo Create");
    assert_eq!(envelope.todo.description, "Description for create test");
    assert!(!envelope.todo.completed);
    assert_eq!(envelope.todo.created_at, envelope.todo.updated_at);
}

#[tokio::test]
async fn create_todo_empty_title_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/todos", r#"{"title":"   "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], "invalid_argument");
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/v1/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app()
        .oneshot(get_request(
            "/v1/todos/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn get_todo_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(get_request("/v1/todos/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PATCH",
            "/v1/todos/00000000-0000-0000-0000-000000000000",
            r#"{"title":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_todo_empty_title_returns_400() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/v1/todos", r#"{"title":"Valid"}"#))
        .await
        .unwrap();
    let created: TodoEnvelope = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/v1/todos/{}", created.todo.id),
            r#"{"title":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/todos/00000000-0000-0000-0000-000000000000")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- pagination ---

#[tokio::test]
async fn list_paginates_with_query_params() {
    use tower::Service;

    let mut app = app().into_service();

    for i in 0..3 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                "/v1/todos",
                &format!(r#"{{"title":"Todo {i}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/v1/todos?pageSize=2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: serde_json::Value = body_json(resp).await;
    assert_eq!(first["todos"].as_array().unwrap().len(), 2);
    let token = first["nextPageToken"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!(
            "/v1/todos?pageSize=2&pageToken={token}"
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let second: serde_json::Value = body_json(resp).await;
    assert_eq!(second["todos"].as_array().unwrap().len(), 1);
    assert_eq!(second["nextPageToken"], "");
    assert_eq!(second["todos"][0]["title"], "Todo 2");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/v1/todos",
            r#"{"title":"Walk dog","description":"Around the block"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: TodoEnvelope = body_json(resp).await;
    let created: Todo = created.todo;
    assert_eq!(created.title, "Walk dog");
    assert!(!created.completed);
    let id = created.id;

    // list — should contain the one todo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/v1/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = body_json(resp).await;
    assert_eq!(page["todos"].as_array().unwrap().len(), 1);
    assert_eq!(page["todos"][0]["id"], id.to_string());

    // get — deep-equal to the creation result
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: TodoEnvelope = body_json(resp).await;
    assert_eq!(fetched.todo, created);

    // update — partial: only completed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/v1/todos/{id}"),
            r#"{"completed":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: TodoEnvelope = body_json(resp).await;
    assert_eq!(updated.todo.title, "Walk dog"); // unchanged
    assert_eq!(updated.todo.description, "Around the block"); // unchanged
    assert!(updated.todo.completed);
    assert!(updated.todo.updated_at > created.updated_at);
    assert_eq!(updated.todo.created_at, created.created_at);

    // update — partial: only title
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/v1/todos/{id}"),
            r#"{"title":"Walk cat"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let renamed: TodoEnvelope = body_json(resp).await;
    assert_eq!(renamed.todo.title, "Walk cat");
    assert!(renamed.todo.completed); // unchanged from previous update
    assert!(renamed.todo.updated_at > updated.todo.updated_at);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/todos/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/v1/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again — 404, not a silent success
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/todos/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/v1/todos"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = body_json(resp).await;
    assert!(page["todos"].as_array().unwrap().is_empty());
}
