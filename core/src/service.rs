//! The todo resource contract: validation, identity, timestamps,
//! pagination, and the Live/Deleted lifecycle.
//!
//! # Design
//! `TodoService` wraps the store in a single `RwLock`: reads (`get`, `list`)
//! share it, mutations hold it exclusively, so every operation is atomic and
//! concurrent updates to one id serialize with last-committed-write-wins
//! ordering. Pagination is not snapshot-isolated against concurrent
//! deletes — a record deleted mid-traversal simply stops appearing.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::cursor;
use crate::error::ServiceError;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::store::TodoStore;
use crate::types::{CreateTodo, Todo, TodoPage, UpdateTodo};

/// Page size applied when the request leaves it unset or non-positive.
pub const DEFAULT_PAGE_SIZE: i32 = 50;
/// Hard cap on a single page; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: i32 = 100;

/// The todo service. Cheap to clone; clones share the same store.
pub struct TodoService<S> {
    store: Arc<RwLock<S>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for TodoService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: TodoStore> TodoService<S> {
    /// Service over `store` with wall-clock time and random v4 ids.
    pub fn new(store: S) -> Self {
        Self::with_collaborators(store, Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    /// Service with explicit clock and id collaborators. Tests use this to
    /// pin timestamps and ids.
    pub fn with_collaborators(
        store: S,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            ids,
            clock,
        }
    }

    /// Create a new todo. `title` must be non-empty after trimming;
    /// `description` may be empty. New todos start incomplete with
    /// `created_at == updated_at`.
    pub async fn create(&self, input: CreateTodo) -> Result<Todo, ServiceError> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::InvalidArgument(
                "title must not be empty".to_string(),
            ));
        }
        let now = self.clock.now();
        let todo = Todo {
            id: self.ids.generate(),
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.store.write().await.insert(todo.clone())?;
        info!(id = %todo.id, "created todo");
        Ok(todo)
    }

    /// Fetch a todo by id. Deleted ids are indistinguishable from ids that
    /// never existed.
    pub async fn get(&self, id: Uuid) -> Result<Todo, ServiceError> {
        let todo = self
            .store
            .read()
            .await
            .get(&id)?
            .ok_or(ServiceError::NotFound(id))?;
        debug!(id = %id, "fetched todo");
        Ok(todo)
    }

    /// List todos in creation order. An empty `page_token` starts from the
    /// beginning; the returned token is empty once the listing is exhausted.
    pub async fn list(&self, page_size: i32, page_token: &str) -> Result<TodoPage, ServiceError> {
        let limit = effective_page_size(page_size);
        let after = if page_token.is_empty() {
            None
        } else {
            let position = cursor::decode(page_token)
                .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;
            Some(position)
        };
        let page = self.store.read().await.scan(after, limit)?;
        debug!(count = page.items.len(), "listed todos");
        Ok(TodoPage {
            todos: page.items,
            next_page_token: page.next.map(cursor::encode).unwrap_or_default(),
        })
    }

    /// Apply a partial update. Only supplied fields overwrite stored values;
    /// `updated_at` strictly advances on every success, identical content or
    /// not.
    pub async fn update(&self, id: Uuid, patch: UpdateTodo) -> Result<Todo, ServiceError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(ServiceError::InvalidArgument(
                    "title must not be empty".to_string(),
                ));
            }
        }
        let mut store = self.store.write().await;
        let mut todo = store.get(&id)?.ok_or(ServiceError::NotFound(id))?;
        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.updated_at = advanced(self.clock.now(), todo.updated_at);
        if !store.update(todo.clone())? {
            return Err(ServiceError::NotFound(id));
        }
        info!(id = %id, "updated todo");
        Ok(todo)
    }

    /// Delete a todo permanently. Not idempotent: deleting an already
    /// deleted or unknown id fails with `NotFound`.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.write().await.delete(&id)? {
            return Err(ServiceError::NotFound(id));
        }
        info!(id = %id, "deleted todo");
        Ok(())
    }
}

fn effective_page_size(requested: i32) -> usize {
    let size = if requested <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        requested.min(MAX_PAGE_SIZE)
    };
    size as usize
}

/// The refreshed `updated_at` must strictly exceed the stored one even when
/// the clock has not ticked past it.
fn advanced(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}
