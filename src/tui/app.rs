//! Top-level terminal application.
//!
//! `TuiApp` owns the per-screen view state and routes terminal events to
//! whichever screen the current route resolves to. All domain state lives in
//! [`AppState`]; views only keep focus, cursors and scroll positions.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{AppState, View};
use crate::fields::format_role;
use crate::tui::board_view::{BoardAction, BoardView};
use crate::tui::boards_view::BoardsView;
use crate::tui::chat_view::ChatView;
use crate::tui::colors::{notice_color, text_on};
use crate::tui::login_view::LoginView;
use crate::tui::settings_view::SettingsView;
use crate::tui::task_form::{FormAction, TaskForm};
use crate::tui::utils::centered_rect;

pub struct TuiApp {
    pub state: AppState,
    board: BoardView,
    form: Option<TaskForm>,
    login: LoginView,
    chat: ChatView,
    settings: SettingsView,
    boards: BoardsView,
    quit: bool,
}

impl TuiApp {
    pub fn new(state: AppState) -> Self {
        let board = BoardView::new(&state.config);
        let mut app = TuiApp {
            state,
            board,
            form: None,
            login: LoginView::new(),
            chat: ChatView::default(),
            settings: SettingsView::default(),
            boards: BoardsView::default(),
            quit: false,
        };
        app.sync_form();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Keep the form in step with the editor the route opened.
    fn sync_form(&mut self) {
        match &self.state.editor {
            Some(editor) => {
                let stale = self.form.as_ref().map_or(true, |f| f.mode != editor.mode);
                if stale {
                    self.form = Some(TaskForm::from_editor(editor));
                }
            }
            None => self.form = None,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) if self.state.current_view() == View::Board => {
                self.board.handle_mouse(&mut self.state, mouse);
            }
            _ => {}
        }
        self.sync_form();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        self.state.notices.dismiss();

        match self.state.current_view() {
            View::Landing => {
                if self.login.handle_key(&mut self.state, key) {
                    self.quit = true;
                }
            }
            View::Board => {
                if self.board.handle_key(&mut self.state, key) == BoardAction::Quit {
                    self.quit = true;
                }
            }
            View::Editor => self.handle_editor_key(key),
            View::Chat => self.chat.handle_key(&mut self.state, key),
            View::Settings => self.settings.handle_key(&mut self.state, key),
            View::Boards => self.boards.handle_key(&mut self.state, key),
            View::NotFound(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) && !self.state.back() {
                    self.state.router.reset();
                }
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let (Some(form), Some(editor)) = (self.form.as_mut(), self.state.editor.as_mut()) else {
            return;
        };
        // Failures are pushed as notices by `AppState`; the form stays open.
        match form.handle_key(editor, key) {
            FormAction::None => {}
            FormAction::Save => {
                self.state.submit_editor().ok();
            }
            FormAction::Delete => {
                self.state.delete_from_editor().ok();
            }
            FormAction::Cancel => self.state.cancel_editor(),
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let user = match self.state.user() {
            Some(u) => format!("{} ({})", u.name, format_role(u.role)),
            None => "not signed in".to_string(),
        };
        let line = Line::from(vec![
            Span::styled(" TaskBoard ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("| "),
            Span::raw(user),
            Span::raw(" | "),
            Span::styled(self.state.router.current().path(), Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM)),
            area,
        );
    }

    fn render_not_found(&self, f: &mut Frame, area: Rect, path: &str) {
        let popup = centered_rect(50, 30, area);
        f.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("404", Style::default().add_modifier(Modifier::BOLD))),
                Line::from(format!("Oops! Page not found: {path}")),
                Line::from(""),
                Line::from("Press Enter to go back"),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }

    fn status_hint(&self) -> String {
        match self.state.current_view() {
            View::Landing => "Sign in to open the board | Ctrl+C: Quit".to_string(),
            View::Board => self.board.status_hint(&self.state),
            View::Editor => "Task editor | Ctrl+S: Save | Esc: Cancel".to_string(),
            View::Chat => format!("Chat | {} messages", self.state.chat.messages().len()),
            View::Settings => "Settings | Tab: Next field | Esc: Back".to_string(),
            View::Boards => "Boards | n: New | j: Join | Esc: Back".to_string(),
            View::NotFound(_) => "Page not found".to_string(),
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let (text, bg) = match self.state.notices.latest() {
            Some(notice) => (notice.line(), notice_color(notice.variant)),
            None => (self.status_hint(), Color::Rgb(40, 40, 40)),
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(bg).fg(text_on(bg)))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.state.current_view() {
            View::Landing => self.login.render(f, chunks[1]),
            View::Board => self.board.render(f, chunks[1], &self.state),
            View::Editor => {
                if let Some(form) = &self.form {
                    form.render(f, chunks[1], &self.state);
                }
            }
            View::Chat => self.chat.render(f, chunks[1], &self.state),
            View::Settings => self.settings.render(f, chunks[1], &self.state),
            View::Boards => self.boards.render(f, chunks[1], &self.state),
            View::NotFound(path) => self.render_not_found(f, chunks[1], &path),
        }
        self.render_status_bar(f, chunks[2]);
    }

    /// Draw, wait for input, repeat until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        tracing::debug!("event loop started");
        while !self.quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(self.state.config.poll_timeout)? {
                let ev = event::read()?;
                self.handle_event(ev);
            }
            self.state.tick();
            self.sync_form();
        }
        tracing::debug!("event loop finished");
        Ok(())
    }
}
