//! In-memory store, ordered by insertion.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use uuid::Uuid;

use crate::store::{ScanPage, StoreError, TodoStore};
use crate::types::Todo;

/// `BTreeMap` keyed by an ever-increasing insertion position, plus an id
/// index. Positions are never recycled, so a record inserted during an
/// in-flight pagination always lands after every cursor already handed out.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_position: u64,
    by_position: BTreeMap<u64, Todo>,
    index: HashMap<Uuid, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    fn insert(&mut self, todo: Todo) -> Result<(), StoreError> {
        let position = self.next_position;
        self.next_position += 1;
        self.index.insert(todo.id, position);
        self.by_position.insert(position, todo);
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Todo>, StoreError> {
        Ok(self
            .index
            .get(id)
            .and_then(|position| self.by_position.get(position))
            .cloned())
    }

    fn update(&mut self, todo: Todo) -> Result<bool, StoreError> {
        match self.index.get(&todo.id) {
            Some(position) => {
                self.by_position.insert(*position, todo);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&mut self, id: &Uuid) -> Result<bool, StoreError> {
        match self.index.remove(id) {
            Some(position) => {
                self.by_position.remove(&position);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn scan(&self, after: Option<u64>, limit: usize) -> Result<ScanPage, StoreError> {
        let start = match after {
            Some(position) => Bound::Excluded(position),
            None => Bound::Unbounded,
        };
        let mut range = self.by_position.range((start, Bound::Unbounded));
        let mut items = Vec::with_capacity(limit);
        let mut last_position = None;
        for (position, todo) in range.by_ref().take(limit) {
            items.push(todo.clone());
            last_position = Some(*position);
        }
        // Only report a continuation when something actually remains.
        let next = if range.next().is_some() { last_position } else { None };
        Ok(ScanPage { items, next })
    }
}
