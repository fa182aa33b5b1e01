//! Shared boards and their membership.
//!
//! Boards are created by an owner, advertised by a six-character join code,
//! and can be joined by anyone holding the code. Entering a board records it
//! in the session store under [`CURRENT_BOARD_KEY`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::fields::MemberRole;
use crate::session::{SessionError, SessionStore, CURRENT_BOARD_KEY};
use crate::task::non_blank;

pub const JOIN_CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
    pub owner_name: String,
    pub member_count: usize,
    pub members: Vec<BoardMember>,
}

impl Board {
    pub fn is_owner(&self, user: &User) -> bool {
        self.owner_id == user.id
    }

    pub fn is_member(&self, user: &User) -> bool {
        self.members.iter().any(|m| m.id == user.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateBoardData {
    pub title: String,
    pub description: Option<String>,
}

/// What entering a board leaves behind in the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBoard {
    pub board_id: String,
    pub members: Vec<BoardMember>,
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board title is required")]
    EmptyTitle,
    #[error("join code is required")]
    EmptyCode,
    #[error("no board uses code {0}")]
    UnknownCode(String),
    #[error("board not found: {0}")]
    NotFound(String),
    #[error("only the owner can delete this board")]
    NotOwner,
    #[error("sign in to manage boards")]
    NotSignedIn,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Uppercase, keep only A-Z and 0-9, cap at six characters.
pub fn format_join_code(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .take(JOIN_CODE_LEN)
        .collect()
}

fn generate_code() -> String {
    Uuid::new_v4()
        .as_bytes()
        .iter()
        .take(JOIN_CODE_LEN)
        .map(|b| CODE_ALPHABET[*b as usize % CODE_ALPHABET.len()] as char)
        .collect()
}

fn member(user: &User, role: MemberRole, now: DateTime<Utc>) -> BoardMember {
    BoardMember {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role,
        joined_at: now,
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoardDirectory {
    boards: Vec<Board>,
}

impl BoardDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn get(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// Boards `user` owns or has joined.
    pub fn for_user<'a>(&'a self, user: &'a User) -> impl Iterator<Item = &'a Board> + 'a {
        self.boards.iter().filter(move |b| b.is_member(user))
    }

    pub fn create(&mut self, owner: &User, data: CreateBoardData, now: DateTime<Utc>) -> Result<&Board, BoardError> {
        let title = non_blank(&data.title).ok_or(BoardError::EmptyTitle)?;
        let mut code = generate_code();
        while self.boards.iter().any(|b| b.code == code) {
            code = generate_code();
        }
        let board = Board {
            id: Uuid::new_v4().to_string(),
            title,
            description: data.description.as_deref().and_then(non_blank),
            code,
            created_at: now,
            updated_at: now,
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            member_count: 1,
            members: vec![member(owner, MemberRole::Owner, now)],
        };
        tracing::info!(board = %board.title, code = %board.code, "board created");
        self.boards.push(board);
        Ok(&self.boards[self.boards.len() - 1])
    }

    /// Join by code. Joining a board twice is a no-op.
    pub fn join(&mut self, user: &User, raw_code: &str, now: DateTime<Utc>) -> Result<&Board, BoardError> {
        let code = format_join_code(raw_code);
        if code.is_empty() {
            return Err(BoardError::EmptyCode);
        }
        let board = self
            .boards
            .iter_mut()
            .find(|b| b.code == code)
            .ok_or_else(|| BoardError::UnknownCode(code.clone()))?;
        if !board.is_member(user) {
            board.members.push(member(user, MemberRole::Member, now));
            board.member_count = board.members.len();
            board.updated_at = now;
            tracing::info!(board = %board.title, user = %user.name, "board joined");
        }
        Ok(&*board)
    }

    pub fn delete(&mut self, user: &User, board_id: &str) -> Result<Board, BoardError> {
        let pos = self
            .boards
            .iter()
            .position(|b| b.id == board_id)
            .ok_or_else(|| BoardError::NotFound(board_id.to_string()))?;
        if !self.boards[pos].is_owner(user) {
            return Err(BoardError::NotOwner);
        }
        let removed = self.boards.remove(pos);
        tracing::info!(board = %removed.title, "board deleted");
        Ok(removed)
    }

    /// Record `board_id` as the current board.
    pub fn enter(&self, board_id: &str, store: &mut SessionStore) -> Result<&Board, BoardError> {
        let board = self
            .get(board_id)
            .ok_or_else(|| BoardError::NotFound(board_id.to_string()))?;
        store.set_json(
            CURRENT_BOARD_KEY,
            &CurrentBoard {
                board_id: board.id.clone(),
                members: board.members.clone(),
            },
        )?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserDirectory;
    use pretty_assertions::assert_eq;

    fn users() -> (User, User) {
        let directory = UserDirectory::mock();
        (
            directory.find_by_id("1").cloned().unwrap(),
            directory.find_by_id("2").cloned().unwrap(),
        )
    }

    fn sprint() -> CreateBoardData {
        CreateBoardData {
            title: "  Sprint 12 ".to_string(),
            description: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_format_join_code() {
        assert_eq!(format_join_code("abc-123"), "ABC123");
        assert_eq!(format_join_code(" x y z 9 8 7 6"), "XYZ987");
        assert_eq!(format_join_code("!!!"), "");
    }

    #[test]
    fn test_create_trims_and_makes_owner_member() {
        let (joao, _) = users();
        let mut dir = BoardDirectory::new();
        let board = dir.create(&joao, sprint(), Utc::now()).unwrap();
        assert_eq!(board.title, "Sprint 12");
        assert_eq!(board.description, None);
        assert_eq!(board.code.len(), JOIN_CODE_LEN);
        assert!(board.code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(board.members[0].role, MemberRole::Owner);
        assert_eq!(board.member_count, 1);
    }

    #[test]
    fn test_create_requires_title() {
        let (joao, _) = users();
        let mut dir = BoardDirectory::new();
        let data = CreateBoardData { title: "  ".to_string(), description: None };
        assert!(matches!(dir.create(&joao, data, Utc::now()), Err(BoardError::EmptyTitle)));
        assert!(dir.boards().is_empty());
    }

    #[test]
    fn test_join_by_code_is_idempotent() {
        let (joao, maria) = users();
        let mut dir = BoardDirectory::new();
        let code = dir.create(&joao, sprint(), Utc::now()).unwrap().code.to_lowercase();
        let joined = dir.join(&maria, &code, Utc::now()).unwrap();
        assert_eq!(joined.member_count, 2);
        let again = dir.join(&maria, &code, Utc::now()).unwrap();
        assert_eq!(again.member_count, 2);
        assert_eq!(dir.for_user(&maria).count(), 1);
    }

    #[test]
    fn test_join_errors() {
        let (_, maria) = users();
        let mut dir = BoardDirectory::new();
        assert!(matches!(dir.join(&maria, " - ", Utc::now()), Err(BoardError::EmptyCode)));
        assert!(matches!(dir.join(&maria, "zzz999", Utc::now()), Err(BoardError::UnknownCode(c)) if c == "ZZZ999"));
    }

    #[test]
    fn test_only_owner_deletes() {
        let (joao, maria) = users();
        let mut dir = BoardDirectory::new();
        let board = dir.create(&joao, sprint(), Utc::now()).unwrap();
        let (id, code) = (board.id.clone(), board.code.clone());
        dir.join(&maria, &code, Utc::now()).unwrap();
        assert!(matches!(dir.delete(&maria, &id), Err(BoardError::NotOwner)));
        assert_eq!(dir.delete(&joao, &id).unwrap().id, id);
        assert!(matches!(dir.delete(&joao, &id), Err(BoardError::NotFound(_))));
    }

    #[test]
    fn test_enter_records_current_board() {
        let (joao, _) = users();
        let mut dir = BoardDirectory::new();
        let id = dir.create(&joao, sprint(), Utc::now()).unwrap().id.clone();
        let mut store = SessionStore::new();
        dir.enter(&id, &mut store).unwrap();
        let current: CurrentBoard = store.get_json(CURRENT_BOARD_KEY).unwrap().unwrap();
        assert_eq!(current.board_id, id);
        assert_eq!(current.members.len(), 1);
        assert!(store.get(CURRENT_BOARD_KEY).unwrap().contains("\"boardId\""));
    }
}
