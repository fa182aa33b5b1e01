//! Application state container.
//!
//! `AppState` owns everything that lives for the length of a run: who is
//! signed in, the board, the session store the editor and board talk
//! through, the chat room, the shared-board directory and the navigation
//! history. It starts anonymous on every launch. The TUI drives it; nothing
//! in here knows about terminals.

use chrono::Utc;

use crate::auth::{AuthError, AuthSession, User, UserDirectory};
use crate::board::{ApplyOutcome, BoardState};
use crate::boards::{Board, BoardDirectory, BoardError, CreateBoardData};
use crate::chat::{ChatError, ChatRoom};
use crate::config::Config;
use crate::editor::{EditorError, TaskEditor};
use crate::fields::{ColumnId, SwipeDirection};
use crate::notice::{Notice, Notices};
use crate::route::{Route, Router};
use crate::session::SessionStore;
use crate::settings::{SettingsError, SettingsPage};
use crate::swipe::swipe_target;

/// What the current route resolves to once the auth gate is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Landing,
    Board,
    Settings,
    Chat,
    Boards,
    Editor,
    NotFound(String),
}

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub directory: UserDirectory,
    pub auth: AuthSession,
    pub session: SessionStore,
    pub board: BoardState,
    pub chat: ChatRoom,
    pub boards: BoardDirectory,
    pub router: Router,
    pub editor: Option<TaskEditor>,
    pub settings: SettingsPage,
    pub notices: Notices,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let now = Utc::now();
        let board = if config.sample_tasks {
            BoardState::with_sample_tasks(now)
        } else {
            BoardState::new()
        };
        AppState {
            config,
            directory: UserDirectory::mock(),
            auth: AuthSession::anonymous(),
            session: SessionStore::new(),
            board,
            chat: ChatRoom::general(now),
            boards: BoardDirectory::new(),
            router: Router::default(),
            editor: None,
            settings: SettingsPage::for_user(None),
            notices: Notices::default(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    pub fn current_view(&self) -> View {
        match self.router.current() {
            Route::Home if self.auth.is_authenticated() => View::Board,
            Route::Home => View::Landing,
            Route::Settings => View::Settings,
            Route::Chat => View::Chat,
            Route::Boards => View::Boards,
            Route::NewTask { .. } | Route::EditTask { .. } => View::Editor,
            Route::NotFound(path) => View::NotFound(path.clone()),
        }
    }

    // -- auth ---------------------------------------------------------------

    pub fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let name = match self.auth.login(&self.directory, email, password) {
            Ok(user) => user.name.clone(),
            Err(e) => {
                self.notices
                    .push(Notice::error("Login failed", "Use joao@example.com / 123456"));
                return Err(e);
            }
        };
        self.settings = SettingsPage::for_user(self.auth.user());
        self.chat.post_system(&format!("{name} joined the chat"), Utc::now());
        self.notices.push(Notice::info(format!("Welcome, {name}")));
        self.enter_route();
        Ok(())
    }

    /// Sign out and return to the landing page.
    pub fn logout(&mut self) {
        let Some(user) = self.auth.logout() else {
            return;
        };
        self.chat
            .post_system(&format!("{} left the chat", user.name), Utc::now());
        self.router.reset();
        self.editor = None;
        self.settings = SettingsPage::for_user(None);
        self.notices.push(Notice::info("Signed out"));
    }

    // -- navigation ---------------------------------------------------------

    pub fn navigate(&mut self, route: Route) {
        self.router.navigate(route);
        self.enter_route();
    }

    pub fn back(&mut self) -> bool {
        let moved = self.router.back();
        if moved {
            self.enter_route();
        }
        moved
    }

    /// Set up whatever the route just entered needs.
    fn enter_route(&mut self) {
        let route = self.router.current().clone();
        self.editor = TaskEditor::for_route(&route, &self.session);
        match route {
            Route::Home if self.auth.is_authenticated() => {
                let outcome = self.board.on_mount(&mut self.session, Utc::now());
                self.report(outcome);
            }
            Route::Settings => {
                self.settings = SettingsPage::for_user(self.auth.user());
            }
            _ => {}
        }
    }

    /// Poll for editor results delivered while the board is showing.
    pub fn tick(&mut self) {
        if self.current_view() == View::Board {
            let outcome = self.board.on_storage_event(&mut self.session, Utc::now());
            self.report(outcome);
        }
    }

    fn report(&mut self, outcome: Option<ApplyOutcome>) {
        let notice = match outcome {
            Some(ApplyOutcome::Created { .. }) => Notice::info("Task created"),
            Some(ApplyOutcome::Saved { .. }) => Notice::info("Task updated"),
            Some(ApplyOutcome::Deleted { .. }) => Notice::info("Task deleted"),
            Some(ApplyOutcome::Ignored) | None => return,
        };
        self.notices.push(notice);
    }

    // -- board and editor ---------------------------------------------------

    pub fn open_new_task(&mut self, column: ColumnId) {
        self.navigate(Route::NewTask { column: Some(column) });
    }

    /// Leave a snapshot for the editor and open it.
    pub fn open_edit_task(&mut self, id: &str) {
        match self.board.snapshot_for_edit(id, &mut self.session) {
            Ok(true) => self.navigate(Route::EditTask { id: id.to_string() }),
            Ok(false) => tracing::debug!(id, "edit requested for unknown task"),
            Err(e) => self
                .notices
                .push(Notice::error("Could not open task", e.to_string())),
        }
    }

    /// Validate and post the editor form, then go back to the board.
    pub fn submit_editor(&mut self) -> Result<(), EditorError> {
        let Some(editor) = self.editor.as_ref() else {
            return Ok(());
        };
        match editor.save(&mut self.session) {
            Ok(()) => {
                self.back();
                Ok(())
            }
            Err(e) => {
                self.notices.push(Notice::error("Cannot save task", e.to_string()));
                Err(e)
            }
        }
    }

    pub fn delete_from_editor(&mut self) -> Result<(), EditorError> {
        let Some(editor) = self.editor.as_ref() else {
            return Ok(());
        };
        match editor.delete(&mut self.session) {
            Ok(()) => {
                self.back();
                Ok(())
            }
            Err(e) => {
                self.notices.push(Notice::error("Cannot delete task", e.to_string()));
                Err(e)
            }
        }
    }

    pub fn cancel_editor(&mut self) {
        self.back();
    }

    pub fn move_task(&mut self, id: &str, target: ColumnId) -> bool {
        self.board.move_task(id, target)
    }

    /// Move a card one column over. At either end this does nothing.
    pub fn swipe_card(&mut self, id: &str, direction: SwipeDirection) -> bool {
        let Some(target) = self
            .board
            .find_column_of(id)
            .and_then(|current| swipe_target(current, direction))
        else {
            return false;
        };
        self.board.move_task(id, target)
    }

    // -- chat ---------------------------------------------------------------

    pub fn send_chat(&mut self, content: &str) -> Result<(), ChatError> {
        match self.chat.send(self.auth.user(), content, Utc::now()) {
            Ok(_) => Ok(()),
            Err(ChatError::EmptyMessage) => Err(ChatError::EmptyMessage),
            Err(e) => {
                self.notices.push(Notice::error("Message not sent", e.to_string()));
                Err(e)
            }
        }
    }

    // -- shared boards ------------------------------------------------------

    fn require_user(&mut self) -> Result<User, BoardError> {
        let result = self.auth.user().cloned().ok_or(BoardError::NotSignedIn);
        self.board_result("Sign in required", result)
    }

    fn board_result<T>(&mut self, title: &str, result: Result<T, BoardError>) -> Result<T, BoardError> {
        if let Err(e) = &result {
            self.notices.push(Notice::error(title, e.to_string()));
        }
        result
    }

    pub fn create_board(&mut self, data: CreateBoardData) -> Result<Board, BoardError> {
        let user = self.require_user()?;
        let result = self.boards.create(&user, data, Utc::now()).cloned();
        if let Ok(board) = &result {
            self.notices.push(
                Notice::info("Board created").with_description(format!("Share code {}", board.code)),
            );
        }
        self.board_result("Cannot create board", result)
    }

    pub fn join_board(&mut self, code: &str) -> Result<Board, BoardError> {
        let user = self.require_user()?;
        let result = self.boards.join(&user, code, Utc::now()).cloned();
        if let Ok(board) = &result {
            self.notices.push(Notice::info(format!("Joined {}", board.title)));
        }
        self.board_result("Cannot join board", result)
    }

    pub fn delete_board(&mut self, board_id: &str) -> Result<Board, BoardError> {
        let user = self.require_user()?;
        let result = self.boards.delete(&user, board_id);
        if let Ok(board) = &result {
            self.notices.push(Notice::info(format!("Deleted {}", board.title)));
        }
        self.board_result("Cannot delete board", result)
    }

    /// Record the board as current and show it.
    pub fn enter_board(&mut self, board_id: &str) -> Result<(), BoardError> {
        let result = self.boards.enter(board_id, &mut self.session).map(|_| ());
        if result.is_ok() {
            self.router.reset();
            self.enter_route();
        }
        self.board_result("Cannot open board", result)
    }

    // -- settings -----------------------------------------------------------

    pub fn save_profile(&mut self) -> Result<(), SettingsError> {
        let result = self.settings.save_profile();
        self.settings_notice(&result, "Profile updated");
        result
    }

    pub fn change_password(&mut self) -> Result<(), SettingsError> {
        let result = self.settings.change_password();
        self.settings_notice(&result, "Password changed");
        result
    }

    fn settings_notice(&mut self, result: &Result<(), SettingsError>, success: &str) {
        let notice = match result {
            Ok(()) => Notice::info(success),
            Err(e) => Notice::error("Invalid input", e.to_string()),
        };
        self.notices.push(notice);
    }
}
