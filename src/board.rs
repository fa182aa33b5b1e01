//! Board state and the operations that mutate it.
//!
//! This module provides `BoardState`, the owner of the three workflow columns.
//! It merges editor results back into the columns, moves tasks between
//! columns, and derives filtered views for display. A task id is held by at
//! most one column at any time; every operation here preserves that.

use chrono::{DateTime, Utc};

use crate::channel::{self, EditorResult};
use crate::fields::*;
use crate::session::{edit_task_key, SessionError, SessionStore};
use crate::task::{Column, Task};

/// What applying an editor result did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created { id: String, column: ColumnId },
    Saved { id: String },
    Deleted { id: String, column: ColumnId },
    /// The referenced task was not on the board.
    Ignored,
}

/// Read-only view of one column after filtering.
#[derive(Debug, Clone)]
pub struct ColumnView<'a> {
    pub id: ColumnId,
    pub title: &'a str,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone)]
pub struct BoardState {
    columns: [Column; 3],
    seen_generation: Option<u64>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// An empty board with the three fixed columns.
    pub fn new() -> Self {
        BoardState {
            columns: ColumnId::ALL.map(Column::new),
            seen_generation: None,
        }
    }

    /// A board pre-populated with demonstration tasks.
    pub fn with_sample_tasks(now: DateTime<Utc>) -> Self {
        let mut board = Self::new();
        let samples = [
            ("1", ColumnId::Todo, "Landing page design", "Create a modern, responsive design for the home page", Priority::High, "João Silva", ["design", "ui/ux"]),
            ("2", ColumnId::Todo, "Set up database", "Configure PostgreSQL with the appropriate schemas", Priority::Medium, "Maria Santos", ["backend", "database"]),
            ("3", ColumnId::Doing, "Implement authentication", "Add user login and registration", Priority::High, "Carlos Oliveira", ["frontend", "security"]),
            ("4", ColumnId::Done, "Initial project setup", "Bootstrap the project with its dependencies", Priority::Low, "Ana Costa", ["setup", "initial"]),
        ];
        for (id, column, title, description, priority, assignee, tags) in samples {
            board.columns[column.index()].tasks.push(Task {
                id: id.to_string(),
                title: title.to_string(),
                description: Some(description.to_string()),
                priority,
                assignee: Some(assignee.to_string()),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                created_at: now,
                updated_at: now,
            });
        }
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.index()]
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.columns
            .iter()
            .find_map(|c| c.tasks.iter().find(|t| t.id == id))
    }

    pub fn find_column_of(&self, task_id: &str) -> Option<ColumnId> {
        self.columns
            .iter()
            .find(|c| c.contains(task_id))
            .map(|c| c.id)
    }

    /// Look a column up by its wire name.
    pub fn find_column_by_id(&self, id: &str) -> Option<&Column> {
        id.parse::<ColumnId>().ok().map(|c| self.column(c))
    }

    /// Merge one editor result into the board.
    pub fn apply_pending_result(&mut self, result: EditorResult, now: DateTime<Utc>) -> ApplyOutcome {
        match result {
            EditorResult::Create { task_data } => {
                let column = task_data.column_id;
                let task = Task::from_draft(task_data, now);
                let id = task.id.clone();
                self.columns[column.index()].tasks.push(task);
                tracing::debug!(%id, %column, "task created");
                ApplyOutcome::Created { id, column }
            }
            EditorResult::Save { task_data } => {
                let id = task_data.id.clone();
                let found = self
                    .columns
                    .iter_mut()
                    .find_map(|c| c.tasks.iter_mut().find(|t| t.id == id));
                match found {
                    Some(task) => {
                        task.apply_update(task_data, now);
                        tracing::debug!(%id, "task saved");
                        ApplyOutcome::Saved { id }
                    }
                    None => {
                        tracing::debug!(%id, "save ignored, task not found");
                        ApplyOutcome::Ignored
                    }
                }
            }
            EditorResult::Delete { task_id } => match self.remove_task(&task_id) {
                Some((column, _)) => {
                    tracing::debug!(id = %task_id, %column, "task deleted");
                    ApplyOutcome::Deleted { id: task_id, column }
                }
                None => {
                    tracing::debug!(id = %task_id, "delete ignored, task not found");
                    ApplyOutcome::Ignored
                }
            },
        }
    }

    /// Move a task to the end of `target`. Returns `true` if the board changed.
    pub fn move_task(&mut self, task_id: &str, target: ColumnId) -> bool {
        match self.find_column_of(task_id) {
            None => false,
            Some(current) if current == target => false,
            Some(_) => {
                let Some((from, task)) = self.remove_task(task_id) else {
                    return false;
                };
                self.columns[target.index()].tasks.push(task);
                tracing::debug!(id = task_id, %from, to = %target, "task moved");
                true
            }
        }
    }

    /// Columns restricted to tasks matching `query`. Empty query keeps all.
    pub fn filter(&self, query: &str) -> Vec<ColumnView<'_>> {
        let needle = query.to_lowercase();
        self.columns
            .iter()
            .map(|c| ColumnView {
                id: c.id,
                title: &c.title,
                tasks: c
                    .tasks
                    .iter()
                    .filter(|t| needle.is_empty() || t.matches(&needle))
                    .collect(),
            })
            .collect()
    }

    /// Take and apply the pending editor result, if any.
    pub fn consume_pending(&mut self, store: &mut SessionStore, now: DateTime<Utc>) -> Option<ApplyOutcome> {
        let outcome = channel::take(store).map(|r| self.apply_pending_result(r, now));
        self.seen_generation = Some(store.generation());
        outcome
    }

    /// Called when the board screen becomes visible.
    pub fn on_mount(&mut self, store: &mut SessionStore, now: DateTime<Utc>) -> Option<ApplyOutcome> {
        self.consume_pending(store, now)
    }

    /// Called on every loop tick; reacts only if the store changed.
    pub fn on_storage_event(&mut self, store: &mut SessionStore, now: DateTime<Utc>) -> Option<ApplyOutcome> {
        match self.seen_generation {
            Some(seen) if !store.changed_since(seen) => None,
            _ => self.consume_pending(store, now),
        }
    }

    /// Store a snapshot of the task for the editor to load.
    pub fn snapshot_for_edit(&self, task_id: &str, store: &mut SessionStore) -> Result<bool, SessionError> {
        match self.find_task(task_id) {
            Some(task) => {
                store.set_json(&edit_task_key(task_id), task)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_task(&mut self, task_id: &str) -> Option<(ColumnId, Task)> {
        self.columns.iter_mut().find_map(|c| {
            c.position(task_id).map(|pos| (c.id, c.tasks.remove(pos)))
        })
    }
}
