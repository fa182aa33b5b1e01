//! Landing page: sign in, or a simulated sign up.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::auth::validate_registration;
use crate::notice::Notice;
use crate::tui::enums::LoginMode;
use crate::tui::input::InputField;
use crate::tui::utils::centered_rect;

#[derive(Debug, Default)]
pub struct LoginView {
    pub mode: LoginMode,
    pub name: InputField,
    pub email: InputField,
    pub password: InputField,
    pub confirm: InputField,
    focus: usize,
}

impl LoginView {
    pub fn new() -> Self {
        let mut view = Self::default();
        view.update_active();
        view
    }

    fn field_count(&self) -> usize {
        match self.mode {
            LoginMode::SignIn => 2,
            LoginMode::SignUp => 4,
        }
    }

    fn fields_mut(&mut self) -> Vec<&mut InputField> {
        match self.mode {
            LoginMode::SignIn => vec![&mut self.email, &mut self.password],
            LoginMode::SignUp => vec![&mut self.name, &mut self.email, &mut self.password, &mut self.confirm],
        }
    }

    fn update_active(&mut self) {
        for f in [&mut self.name, &mut self.email, &mut self.password, &mut self.confirm] {
            f.active = false;
        }
        let focus = self.focus;
        if let Some(field) = self.fields_mut().into_iter().nth(focus) {
            field.active = true;
        }
    }

    fn focused(&mut self) -> Option<&mut InputField> {
        let focus = self.focus;
        self.fields_mut().into_iter().nth(focus)
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.focus = 0;
        self.password.clear();
        self.confirm.clear();
        self.update_active();
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, state: &mut AppState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::F(2) => self.toggle_mode(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.field_count();
                self.update_active();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.field_count() - 1) % self.field_count();
                self.update_active();
            }
            KeyCode::Enter => self.submit(state),
            KeyCode::Left => {
                if let Some(f) = self.focused() {
                    f.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(f) = self.focused() {
                    f.move_cursor_right();
                }
            }
            KeyCode::Backspace => {
                if let Some(f) = self.focused() {
                    f.handle_backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(f) = self.focused() {
                    f.handle_char(c);
                }
            }
            _ => {}
        }
        false
    }

    fn submit(&mut self, state: &mut AppState) {
        match self.mode {
            LoginMode::SignIn => {
                if state.login(&self.email.value, &self.password.value).is_ok() {
                    self.password.clear();
                }
            }
            LoginMode::SignUp => match validate_registration(&self.password.value, &self.confirm.value) {
                Ok(()) => {
                    tracing::info!(email = %self.email.value, "sign up simulated");
                    state.notices.push(
                        Notice::info("Account created").with_description("Demo mode: sign in with a demo account"),
                    );
                    self.toggle_mode();
                }
                Err(e) => state.notices.push(Notice::error("Sign up failed", e.to_string())),
            },
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let card = centered_rect(60, 80, area);
        let (title, labels): (&str, &[&str]) = match self.mode {
            LoginMode::SignIn => ("Sign in", &["Email", "Password"]),
            LoginMode::SignUp => ("Create account", &["Name", "Email", "Password", "Confirm password"]),
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        let inner = outer.inner(card);
        f.render_widget(outer, card);

        let mut constraints = vec![Constraint::Length(3)];
        constraints.extend(labels.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        f.render_widget(
            Paragraph::new(vec![
                Line::from("TASKBOARD").style(Style::default().add_modifier(Modifier::BOLD)),
                Line::from("Organize your team's work in three simple stages"),
            ])
            .alignment(Alignment::Center),
            rows[0],
        );

        let values: Vec<String> = match self.mode {
            LoginMode::SignIn => vec![self.email.display(), self.password.display_masked()],
            LoginMode::SignUp => vec![
                self.name.display(),
                self.email.display(),
                self.password.display_masked(),
                self.confirm.display_masked(),
            ],
        };
        for (i, (label, value)) in labels.iter().zip(values).enumerate() {
            let style = if i == self.focus {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            f.render_widget(
                Paragraph::new(value).block(Block::default().borders(Borders::ALL).title(*label).border_style(style)),
                rows[i + 1],
            );
        }

        let switch = match self.mode {
            LoginMode::SignIn => "F2: Create an account",
            LoginMode::SignUp => "F2: Back to sign in",
        };
        f.render_widget(
            Paragraph::new(vec![
                Line::from("Enter: Submit | Tab: Next field | Esc: Quit"),
                Line::from(switch),
                Line::from(""),
                Line::from("Demo accounts: joao@example.com or maria@example.com, password 123456"),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
            rows[labels.len() + 1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;

    fn press(view: &mut LoginView, state: &mut AppState, code: KeyCode) {
        view.handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(view: &mut LoginView, state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(view, state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_sign_in_through_form() {
        let mut state = AppState::new(Config::default());
        let mut view = LoginView::new();
        type_text(&mut view, &mut state, "joao@example.com");
        press(&mut view, &mut state, KeyCode::Tab);
        type_text(&mut view, &mut state, "123456");
        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(state.current_view(), View::Board);
        assert!(view.password.value.is_empty());
    }

    #[test]
    fn test_sign_up_mismatch() {
        let mut state = AppState::new(Config::default());
        let mut view = LoginView::new();
        press(&mut view, &mut state, KeyCode::F(2));
        assert_eq!(view.mode, LoginMode::SignUp);
        view.password = InputField::with_value("abcdef");
        view.confirm = InputField::with_value("abcdeg");
        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(view.mode, LoginMode::SignUp);
        assert_eq!(state.notices.latest().unwrap().title, "Sign up failed");
        assert!(!state.auth.is_authenticated());
    }
}
