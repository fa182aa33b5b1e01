//! Task and column data structures.
//!
//! This module defines the `Task` record shown on cards, the `Column` that
//! holds an ordered list of them, and the two payload shapes the editor hands
//! back to the board: a `TaskDraft` for new tasks and a `TaskUpdate` for edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::*;

/// A single work item on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new task from a draft with a fresh identity.
    pub fn from_draft(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            assignee: draft.assignee,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields with those of `update`, keeping identity
    /// and creation time.
    pub fn apply_update(&mut self, update: TaskUpdate, now: DateTime<Utc>) {
        self.title = update.title;
        self.description = update.description;
        self.priority = update.priority;
        self.assignee = update.assignee;
        self.tags = update.tags;
        self.updated_at = now;
    }

    /// Whether title, description or any tag contains `needle`.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Payload for creating a task in a specific column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub column_id: ColumnId,
}

/// Payload for saving edits to an existing task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One of the three workflow columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: ColumnId,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: ColumnId) -> Self {
        Column {
            id,
            title: format_column(id).to_string(),
            color: id,
            tasks: Vec::new(),
        }
    }

    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.position(task_id).is_some()
    }
}

/// Insert a tag after trimming it. Returns `false` for empty or duplicate tags.
pub fn insert_tag(tags: &mut Vec<String>, raw: &str) -> bool {
    let tag = raw.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

/// Trim a free-form field, mapping blank input to `None`.
pub fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: Some("Wire the login flow".to_string()),
            priority: Priority::High,
            assignee: None,
            tags: vec!["Backend".to_string()],
            column_id: ColumnId::Todo,
        }
    }

    #[test]
    fn test_from_draft_stamps_both_timestamps() {
        let now = Utc::now();
        let task = Task::from_draft(draft("Auth"), now);
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
        assert!(!task.id.is_empty());
        assert_ne!(task.id, Task::from_draft(draft("Auth"), now).id);
    }

    #[test]
    fn test_matches_is_case_insensitive_over_all_fields() {
        let task = Task::from_draft(draft("Auth"), Utc::now());
        assert!(task.matches("auth"));
        assert!(task.matches("login"));
        assert!(task.matches("backend"));
        assert!(!task.matches("frontend"));
    }

    #[test]
    fn test_apply_update_keeps_identity() {
        let created = Utc::now();
        let mut task = Task::from_draft(draft("Auth"), created);
        let id = task.id.clone();
        let later = created + chrono::Duration::seconds(5);
        task.apply_update(
            TaskUpdate {
                id: id.clone(),
                title: "Auth v2".to_string(),
                description: None,
                priority: Priority::Low,
                assignee: Some("Ana".to_string()),
                tags: vec![],
            },
            later,
        );
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Auth v2");
        assert_eq!(task.created_at, created);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn test_insert_tag_suppresses_duplicates() {
        let mut tags = vec![];
        assert!(insert_tag(&mut tags, " docs "));
        assert!(!insert_tag(&mut tags, "docs"));
        assert!(!insert_tag(&mut tags, "   "));
        assert!(insert_tag(&mut tags, "urgent"));
        assert_eq!(tags, vec!["docs".to_string(), "urgent".to_string()]);
    }

    #[test]
    fn test_task_json_uses_camel_case() {
        let task = Task::from_draft(draft("Auth"), Utc::now());
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("assignee").is_none());
    }
}
