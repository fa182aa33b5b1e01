//! Enumerations and field types shared across the board.
//!
//! This module defines the small closed vocabularies the rest of the crate is
//! built on: task priorities, the three workflow columns, user roles and
//! presence, board membership roles and chat message kinds.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Cycle to the next priority, wrapping around.
    pub fn cycle(self, forward: bool) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(1);
        let next = if forward {
            (idx + 1) % Self::ALL.len()
        } else if idx == 0 {
            Self::ALL.len() - 1
        } else {
            idx - 1
        };
        Self::ALL[next]
    }
}

/// The three fixed workflow stages, in board order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    #[default]
    Todo,
    Doing,
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::Doing, ColumnId::Done];

    /// Position of this column on the board (0-based).
    pub fn index(self) -> usize {
        match self {
            ColumnId::Todo => 0,
            ColumnId::Doing => 1,
            ColumnId::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The column to the right, or `None` at the last column.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The column to the left, or `None` at the first column.
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::Doing => "doing",
            ColumnId::Done => "done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(ColumnId::Todo),
            "doing" => Ok(ColumnId::Doing),
            "done" => Ok(ColumnId::Done),
            other => Err(format!("unknown column: {other}")),
        }
    }
}

/// Account role shown on the profile page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Viewer,
}

/// Presence status of a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Offline,
    Away,
}

/// Membership role inside a shared board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Member,
}

/// Kind of chat message.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    System,
}

/// Horizontal gesture direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

/// Human-facing column title, as shown in column headers and tabs.
pub fn format_column(c: ColumnId) -> &'static str {
    match c {
        ColumnId::Todo => "To Do",
        ColumnId::Doing => "Doing",
        ColumnId::Done => "Done",
    }
}

pub fn format_role(r: Role) -> &'static str {
    match r {
        Role::Admin => "admin",
        Role::Member => "member",
        Role::Viewer => "viewer",
    }
}

pub fn format_member_role(r: MemberRole) -> &'static str {
    match r {
        MemberRole::Owner => "Owner",
        MemberRole::Member => "Member",
    }
}
