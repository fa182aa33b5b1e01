//! Full-screen task editor.
//!
//! The editor never touches the board directly. On submit it posts an
//! [`EditorResult`] to the session store and the caller navigates back; the
//! board picks the result up the next time it mounts.

use chrono::{DateTime, Utc};

use crate::channel::{self, EditorResult};
use crate::fields::{ColumnId, Priority};
use crate::route::Route;
use crate::session::{edit_task_key, SessionError, SessionStore};
use crate::task::{insert_tag, non_blank, Task, TaskDraft, TaskUpdate};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("title is required")]
    EmptyTitle,
    #[error("only an existing task can be deleted")]
    NotEditing,
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create { column: ColumnId },
    Edit { id: String },
}

/// Raw form contents, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub tags: Vec<String>,
    pub new_tag: String,
}

impl EditorForm {
    fn from_task(task: &Task) -> Self {
        EditorForm {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            assignee: task.assignee.clone().unwrap_or_default(),
            tags: task.tags.clone(),
            new_tag: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskEditor {
    pub mode: EditorMode,
    pub form: EditorForm,
    /// When the task being edited was created, shown read-only.
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskEditor {
    pub fn create(column: Option<ColumnId>) -> Self {
        TaskEditor {
            mode: EditorMode::Create {
                column: column.unwrap_or_default(),
            },
            form: EditorForm::default(),
            created_at: None,
        }
    }

    /// Open the editor for `id`, loading the snapshot the board left behind.
    /// A missing or unreadable snapshot leaves the form empty.
    pub fn edit(id: &str, store: &SessionStore) -> Self {
        let snapshot = match store.get_json::<Task>(&edit_task_key(id)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "discarding edit snapshot");
                None
            }
        };
        TaskEditor {
            mode: EditorMode::Edit { id: id.to_string() },
            form: snapshot.as_ref().map(EditorForm::from_task).unwrap_or_default(),
            created_at: snapshot.map(|t| t.created_at),
        }
    }

    /// Build the editor a route asks for, if it is an editor route.
    pub fn for_route(route: &Route, store: &SessionStore) -> Option<Self> {
        match route {
            Route::NewTask { column } => Some(Self::create(*column)),
            Route::EditTask { id } => Some(Self::edit(id, store)),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    /// Move the pending tag into the tag list.
    pub fn add_tag(&mut self) -> bool {
        let added = insert_tag(&mut self.form.tags, &self.form.new_tag);
        if added {
            self.form.new_tag.clear();
        }
        added
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.form.tags.len();
        self.form.tags.retain(|t| t != tag);
        self.form.tags.len() != before
    }

    /// The result this form would post, or a validation error.
    pub fn result(&self) -> Result<EditorResult, EditorError> {
        let title = non_blank(&self.form.title).ok_or(EditorError::EmptyTitle)?;
        let description = non_blank(&self.form.description);
        let assignee = non_blank(&self.form.assignee);
        let tags = self.form.tags.clone();
        let priority = self.form.priority;

        Ok(match &self.mode {
            EditorMode::Create { column } => EditorResult::Create {
                task_data: TaskDraft {
                    title,
                    description,
                    priority,
                    assignee,
                    tags,
                    column_id: *column,
                },
            },
            EditorMode::Edit { id } => EditorResult::Save {
                task_data: TaskUpdate {
                    id: id.clone(),
                    title,
                    description,
                    priority,
                    assignee,
                    tags,
                },
            },
        })
    }

    /// Validate and post the form. On error nothing is written.
    pub fn save(&self, store: &mut SessionStore) -> Result<(), EditorError> {
        let result = self.result()?;
        channel::post(store, &result)?;
        Ok(())
    }

    pub fn delete(&self, store: &mut SessionStore) -> Result<(), EditorError> {
        let EditorMode::Edit { id } = &self.mode else {
            return Err(EditorError::NotEditing);
        };
        channel::post(store, &EditorResult::Delete { task_id: id.clone() })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(mut editor: TaskEditor) -> TaskEditor {
        editor.form.title = "  Write spec ".to_string();
        editor.form.description = "   ".to_string();
        editor.form.assignee = "Maria".to_string();
        editor
    }

    #[test]
    fn test_create_defaults_to_todo() {
        let store = SessionStore::new();
        let editor = TaskEditor::for_route(&Route::parse("/task/new?column=bogus"), &store).unwrap();
        assert_eq!(editor.mode, EditorMode::Create { column: ColumnId::Todo });
        assert_eq!(editor.form.priority, Priority::Medium);
        assert!(TaskEditor::for_route(&Route::Chat, &store).is_none());
    }

    #[test]
    fn test_save_posts_trimmed_draft() {
        let mut store = SessionStore::new();
        let editor = filled(TaskEditor::create(Some(ColumnId::Doing)));
        editor.save(&mut store).unwrap();
        match channel::take(&mut store) {
            Some(EditorResult::Create { task_data }) => {
                assert_eq!(task_data.title, "Write spec");
                assert_eq!(task_data.description, None);
                assert_eq!(task_data.assignee.as_deref(), Some("Maria"));
                assert_eq!(task_data.column_id, ColumnId::Doing);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_title_writes_nothing() {
        let mut store = SessionStore::new();
        let mut editor = TaskEditor::create(None);
        editor.form.title = "   ".to_string();
        assert!(matches!(editor.save(&mut store), Err(EditorError::EmptyTitle)));
        assert!(!channel::is_pending(&store));
    }

    #[test]
    fn test_edit_loads_snapshot() {
        let mut store = SessionStore::new();
        let mut task = Task::from_draft(
            TaskDraft {
                title: "Fix login".to_string(),
                description: Some("OAuth flow".to_string()),
                priority: Priority::High,
                assignee: None,
                tags: vec!["auth".to_string()],
                column_id: ColumnId::Todo,
            },
            Utc::now(),
        );
        task.id = "7".to_string();
        store.set_json(&edit_task_key("7"), &task).unwrap();

        let editor = TaskEditor::edit("7", &store);
        assert!(editor.is_editing());
        assert_eq!(editor.form.title, "Fix login");
        assert_eq!(editor.form.description, "OAuth flow");
        assert_eq!(editor.form.priority, Priority::High);
        assert_eq!(editor.form.tags, vec!["auth".to_string()]);
    }

    #[test]
    fn test_edit_with_bad_snapshot_is_empty() {
        let mut store = SessionStore::new();
        store.set(&edit_task_key("9"), "{oops".to_string());
        let editor = TaskEditor::edit("9", &store);
        assert_eq!(editor.form, EditorForm::default());
        assert_eq!(TaskEditor::edit("missing", &store).form, EditorForm::default());
    }

    #[test]
    fn test_edit_posts_save_and_delete() {
        let mut store = SessionStore::new();
        let editor = filled(TaskEditor::edit("3", &store));
        editor.save(&mut store).unwrap();
        assert!(matches!(
            channel::take(&mut store),
            Some(EditorResult::Save { task_data }) if task_data.id == "3"
        ));
        editor.delete(&mut store).unwrap();
        assert_eq!(
            channel::take(&mut store),
            Some(EditorResult::Delete { task_id: "3".to_string() })
        );
    }

    #[test]
    fn test_delete_requires_edit_mode() {
        let mut store = SessionStore::new();
        let editor = filled(TaskEditor::create(None));
        assert!(matches!(editor.delete(&mut store), Err(EditorError::NotEditing)));
    }

    #[test]
    fn test_tags() {
        let mut editor = TaskEditor::create(None);
        editor.form.new_tag = " docs ".to_string();
        assert!(editor.add_tag());
        assert!(editor.form.new_tag.is_empty());
        editor.form.new_tag = "docs".to_string();
        assert!(!editor.add_tag());
        assert_eq!(editor.form.new_tag, "docs");
        assert!(editor.remove_tag("docs"));
        assert!(!editor.remove_tag("docs"));
    }
}
