//! Ephemeral team chat.
//!
//! One in-memory room with an append-only message list. Nothing is persisted
//! and nothing is sent anywhere.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::fields::MessageKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("sign in to send messages")]
    NotAuthenticated,
}

#[derive(Debug, Clone)]
pub struct ChatRoom {
    pub id: String,
    pub name: String,
    pub participants: Vec<User>,
    messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl ChatRoom {
    /// The default room, opened with a greeting.
    pub fn general(now: DateTime<Utc>) -> Self {
        ChatRoom {
            id: "general".to_string(),
            name: "Team".to_string(),
            participants: Vec::new(),
            messages: vec![ChatMessage {
                id: "1".to_string(),
                user_id: "2".to_string(),
                user_name: "Maria Santos".to_string(),
                user_avatar: None,
                content: "Hi everyone! How are the tasks going?".to_string(),
                timestamp: now,
                kind: MessageKind::Text,
            }],
            created_at: now,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a text message from `author`.
    pub fn send(&mut self, author: Option<&User>, content: &str, now: DateTime<Utc>) -> Result<&ChatMessage, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let author = author.ok_or(ChatError::NotAuthenticated)?;
        if !self.participants.iter().any(|p| p.id == author.id) {
            self.participants.push(author.clone());
        }
        tracing::debug!(user = %author.name, "chat message");
        Ok(self.push(ChatMessage {
            id: Uuid::new_v4().to_string(),
            user_id: author.id.clone(),
            user_name: author.name.clone(),
            user_avatar: author.avatar.clone(),
            content: content.to_string(),
            timestamp: now,
            kind: MessageKind::Text,
        }))
    }

    /// Append a system notice, such as someone joining.
    pub fn post_system(&mut self, content: &str, now: DateTime<Utc>) -> &ChatMessage {
        self.push(ChatMessage {
            id: Uuid::new_v4().to_string(),
            user_id: "system".to_string(),
            user_name: "System".to_string(),
            user_avatar: None,
            content: content.to_string(),
            timestamp: now,
            kind: MessageKind::System,
        })
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Whether chrono can render with `format`.
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Render a timestamp in local time using a chrono format string. An
/// unusable format falls back to `HH:MM`.
pub fn format_time(ts: DateTime<Utc>, format: &str) -> String {
    let local = ts.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        tracing::warn!(fmt = %format, "unusable timestamp format");
        return local.format(DEFAULT_TIME_FORMAT).to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserDirectory;

    #[test]
    fn test_room_starts_with_greeting() {
        let room = ChatRoom::general(Utc::now());
        assert_eq!(room.messages().len(), 1);
        assert_eq!(room.messages()[0].user_name, "Maria Santos");
    }

    #[test]
    fn test_send_appends_with_author() {
        let directory = UserDirectory::mock();
        let joao = directory.find_by_email("joao@example.com");
        let mut room = ChatRoom::general(Utc::now());
        let sent = room.send(joao, "On it!", Utc::now()).unwrap();
        assert_eq!(sent.user_name, "João Silva");
        assert_eq!(sent.kind, MessageKind::Text);
        assert_eq!(room.messages().len(), 2);
        assert_eq!(room.participants.len(), 1);
    }

    #[test]
    fn test_send_rejects_blank_and_anonymous() {
        let directory = UserDirectory::mock();
        let mut room = ChatRoom::general(Utc::now());
        assert_eq!(
            room.send(directory.find_by_id("1"), "   ", Utc::now()).unwrap_err(),
            ChatError::EmptyMessage
        );
        assert_eq!(room.send(None, "hello", Utc::now()).unwrap_err(), ChatError::NotAuthenticated);
        assert_eq!(room.messages().len(), 1);
    }

    #[test]
    fn test_system_messages_serialize_type() {
        let mut room = ChatRoom::general(Utc::now());
        let msg = room.post_system("João Silva joined", Utc::now());
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(json["type"], "system");
    }

    #[test]
    fn test_format_time_has_hours_and_minutes() {
        let formatted = format_time(Utc::now(), "%H:%M");
        assert_eq!(formatted.len(), 5);
        assert_eq!(formatted.chars().nth(2), Some(':'));
    }

    #[test]
    fn test_bad_format_falls_back() {
        assert!(!is_valid_time_format("%Q"));
        assert!(is_valid_time_format("%H:%M:%S"));
        let ts = Utc::now();
        assert_eq!(format_time(ts, "%Q"), format_time(ts, DEFAULT_TIME_FORMAT));
    }
}
