//! Shared boards screen: list, create, join and delete.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::boards::{Board, CreateBoardData};
use crate::fields::format_member_role;
use crate::tui::enums::BoardsInput;
use crate::tui::input::InputField;

#[derive(Debug, Default)]
pub struct BoardsView {
    pub selected: usize,
    pub input_mode: BoardsInput,
    pub input: InputField,
}

impl BoardsView {
    /// Board ids visible to the signed-in user, in directory order.
    fn visible_ids(state: &AppState) -> Vec<String> {
        match state.user() {
            Some(user) => state.boards.for_user(user).map(|b| b.id.clone()).collect(),
            None => Vec::new(),
        }
    }

    fn selected_id(&self, state: &AppState) -> Option<String> {
        Self::visible_ids(state).into_iter().nth(self.selected)
    }

    fn clamp(&mut self, state: &AppState) {
        let count = Self::visible_ids(state).len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn start_input(&mut self, mode: BoardsInput) {
        self.input_mode = mode;
        self.input.clear();
        self.input.active = true;
    }

    fn stop_input(&mut self) {
        self.input_mode = BoardsInput::None;
        self.input.clear();
        self.input.active = false;
    }

    pub fn handle_key(&mut self, state: &mut AppState, key: KeyEvent) {
        if self.input_mode != BoardsInput::None {
            self.handle_input_key(state, key);
            return;
        }
        match key.code {
            KeyCode::Esc => {
                state.back();
            }
            KeyCode::Char('n') => self.start_input(BoardsInput::NewTitle),
            KeyCode::Char('j') => self.start_input(BoardsInput::JoinCode),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected += 1;
                self.clamp(state);
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_id(state) {
                    // Reported as a notice on failure
                    state.enter_board(&id).ok();
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = self.selected_id(state) {
                    if state.delete_board(&id).is_ok() {
                        self.clamp(state);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, state: &mut AppState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.stop_input(),
            KeyCode::Enter => {
                let value = self.input.value.clone();
                let ok = match self.input_mode {
                    BoardsInput::NewTitle => state
                        .create_board(CreateBoardData { title: value, description: None })
                        .is_ok(),
                    BoardsInput::JoinCode => state.join_board(&value).is_ok(),
                    BoardsInput::None => false,
                };
                if ok {
                    self.stop_input();
                    self.selected = Self::visible_ids(state).len().saturating_sub(1);
                }
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }
    }

    fn board_item<'a>(board: &'a Board, state: &AppState) -> ListItem<'a> {
        let role = state
            .user()
            .and_then(|u| board.members.iter().find(|m| m.id == u.id))
            .map_or("-", |m| format_member_role(m.role));
        ListItem::new(Line::from(vec![
            Span::styled(
                format!("{:<24}", board.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {} ", board.code), Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                " {} member{} | {role} | by {}",
                board.member_count,
                if board.member_count == 1 { "" } else { "s" },
                board.owner_name
            )),
        ]))
    }

    pub fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let boards: Vec<&Board> = match state.user() {
            Some(user) => state.boards.for_user(user).collect(),
            None => Vec::new(),
        };
        if boards.is_empty() {
            f.render_widget(
                Paragraph::new(vec![
                    Line::from("No boards yet."),
                    Line::from("Press n to create one, or j to join with a code."),
                ])
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Boards")),
                chunks[0],
            );
        } else {
            let items: Vec<ListItem> = boards.iter().map(|b| Self::board_item(b, state)).collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(format!("Boards ({})", boards.len())))
                .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            let mut list_state = ListState::default();
            list_state.select(Some(self.selected.min(boards.len() - 1)));
            f.render_stateful_widget(list, chunks[0], &mut list_state);
        }

        let (title, body) = match self.input_mode {
            BoardsInput::NewTitle => ("New board title (Enter to create, Esc to cancel)", self.input.display()),
            BoardsInput::JoinCode => ("Join code (Enter to join, Esc to cancel)", self.input.display()),
            BoardsInput::None => (
                "Actions",
                "n: New | j: Join | Enter: Open | x: Delete | Esc: Back".to_string(),
            ),
        };
        f.render_widget(
            Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::config::Config;
    use crate::route::Route;
    use crossterm::event::KeyModifiers;

    fn press(view: &mut BoardsView, state: &mut AppState, code: KeyCode) {
        view.handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(view: &mut BoardsView, state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(view, state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_create_then_join_from_other_account() {
        let mut state = AppState::new(Config::default());
        state.login("joao@example.com", "123456").unwrap();
        state.navigate(Route::Boards);
        let mut view = BoardsView::default();

        press(&mut view, &mut state, KeyCode::Char('n'));
        assert_eq!(view.input_mode, BoardsInput::NewTitle);
        type_text(&mut view, &mut state, "Sprint");
        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(view.input_mode, BoardsInput::None);
        let code = state.boards.boards()[0].code.clone();

        state.logout();
        state.login("maria@example.com", "123456").unwrap();
        state.navigate(Route::Boards);
        press(&mut view, &mut state, KeyCode::Char('j'));
        type_text(&mut view, &mut state, &code.to_lowercase());
        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(state.boards.boards()[0].member_count, 2);

        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(state.current_view(), View::Board);
    }

    #[test]
    fn test_empty_title_keeps_input_open() {
        let mut state = AppState::new(Config::default());
        state.login("joao@example.com", "123456").unwrap();
        state.navigate(Route::Boards);
        let mut view = BoardsView::default();
        press(&mut view, &mut state, KeyCode::Char('n'));
        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(view.input_mode, BoardsInput::NewTitle);
        assert!(state.boards.boards().is_empty());
        press(&mut view, &mut state, KeyCode::Esc);
        assert_eq!(view.input_mode, BoardsInput::None);
    }
}
