//! Editor-to-board result channel.
//!
//! The editor leaves exactly one `EditorResult` under
//! [`EDITOR_RESULT_KEY`](crate::session::EDITOR_RESULT_KEY) before handing
//! control back. The board takes it on mount or when the store reports a
//! change. Taking removes the key before the payload is parsed, so a result is
//! applied at most once no matter how many triggers fire, and a malformed
//! payload is dropped rather than retried.

use serde::{Deserialize, Serialize};

use crate::session::{SessionError, SessionStore, EDITOR_RESULT_KEY};
use crate::task::{TaskDraft, TaskUpdate};

/// The pending action produced by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum EditorResult {
    Create {
        #[serde(rename = "taskData")]
        task_data: TaskDraft,
    },
    Save {
        #[serde(rename = "taskData")]
        task_data: TaskUpdate,
    },
    Delete {
        #[serde(rename = "taskId")]
        task_id: String,
    },
}

/// Leave a result for the board, replacing any unconsumed one.
pub fn post(store: &mut SessionStore, result: &EditorResult) -> Result<(), SessionError> {
    store.set_json(EDITOR_RESULT_KEY, result)
}

/// Remove and decode the pending result, if any.
pub fn take(store: &mut SessionStore) -> Option<EditorResult> {
    let raw = store.remove(EDITOR_RESULT_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed editor result");
            None
        }
    }
}

pub fn is_pending(store: &SessionStore) -> bool {
    store.contains(EDITOR_RESULT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{ColumnId, Priority};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_take_is_at_most_once() {
        let mut store = SessionStore::new();
        let result = EditorResult::Delete { task_id: "7".to_string() };
        post(&mut store, &result).unwrap();
        assert!(is_pending(&store));
        assert_eq!(take(&mut store), Some(result));
        assert_eq!(take(&mut store), None);
        assert!(!is_pending(&store));
    }

    #[test]
    fn test_malformed_payload_is_discarded() {
        let mut store = SessionStore::new();
        store.set(EDITOR_RESULT_KEY, "{\"action\":".to_string());
        assert_eq!(take(&mut store), None);
        assert!(!is_pending(&store));

        store.set(EDITOR_RESULT_KEY, r#"{"action":"archive","taskId":"1"}"#.to_string());
        assert_eq!(take(&mut store), None);
        assert!(!is_pending(&store));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "action": "create",
            "taskData": {
                "title": "Write spec",
                "priority": "medium",
                "tags": ["docs", "urgent"],
                "columnId": "doing"
            }
        }"#;
        let parsed: EditorResult = serde_json::from_str(json).unwrap();
        let EditorResult::Create { task_data } = parsed else {
            panic!("expected create");
        };
        assert_eq!(task_data.column_id, ColumnId::Doing);
        assert_eq!(task_data.priority, Priority::Medium);
        assert_eq!(task_data.description, None);

        let delete = serde_json::to_value(EditorResult::Delete { task_id: "3".to_string() }).unwrap();
        assert_eq!(delete, serde_json::json!({"action": "delete", "taskId": "3"}));
    }
}
