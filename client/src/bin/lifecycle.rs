//! CLI-style script driving the full todo lifecycle against a running
//! server: create, get, list, update, delete, then verify the delete took.
//!
//! Point it at a server with `TODO_SERVER_URL` (default
//! `http://127.0.0.1:8080`).

use todo_client::{ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, TodoClient, UpdateTodo};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Execute an `HttpRequest` with ureq, returning non-2xx responses as data
/// so the client decides how to interpret them.
fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, Box<dyn std::error::Error>> {
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url =
        std::env::var("TODO_SERVER_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let client = TodoClient::new(&base_url);
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    info!(%base_url, "starting client operations");

    // Create a new todo.
    let req = client.build_create_todo(&CreateTodo {
        title: "Learn the todo API".to_string(),
        description: "Walk through every operation once".to_string(),
    })?;
    let created = client.parse_create_todo(execute(&agent, req)?)?;
    info!(id = %created.id, title = %created.title, "created todo");

    // Get it back.
    let req = client.build_get_todo(created.id);
    let fetched = client.parse_get_todo(execute(&agent, req)?)?;
    info!(id = %fetched.id, "retrieved todo");

    // List the first page.
    let req = client.build_list_todos(Some(10), None);
    let page = client.parse_list_todos(execute(&agent, req)?)?;
    info!(count = page.todos.len(), "listed todos");

    // Update it.
    let req = client.build_update_todo(
        created.id,
        &UpdateTodo {
            title: Some("Learn the todo API - done".to_string()),
            description: Some("Every operation exercised".to_string()),
            completed: Some(true),
        },
    )?;
    let updated = client.parse_update_todo(execute(&agent, req)?)?;
    info!(id = %updated.id, completed = updated.completed, "updated todo");

    // Delete it.
    let req = client.build_delete_todo(created.id);
    client.parse_delete_todo(execute(&agent, req)?)?;
    info!(id = %created.id, "deleted todo");

    // Verify the delete took: NotFound here is success.
    let req = client.build_get_todo(created.id);
    match client.parse_get_todo(execute(&agent, req)?) {
        Err(ApiError::NotFound) => info!(id = %created.id, "verified deletion"),
        Ok(_) => return Err("todo still retrievable after delete".into()),
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
