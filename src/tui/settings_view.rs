//! Settings screen: profile, password, preferences and account info.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::fields::format_role;
use crate::settings::PasswordField;
use crate::tui::enums::SettingsField;

#[derive(Debug, Default)]
pub struct SettingsView {
    pub focus: SettingsField,
}

fn password_field(field: SettingsField) -> Option<PasswordField> {
    match field {
        SettingsField::CurrentPassword => Some(PasswordField::Current),
        SettingsField::NewPassword => Some(PasswordField::New),
        SettingsField::ConfirmPassword => Some(PasswordField::Confirm),
        _ => None,
    }
}

impl SettingsView {
    fn text_mut<'a>(&self, state: &'a mut AppState) -> Option<&'a mut String> {
        let page = &mut state.settings;
        match self.focus {
            SettingsField::Name => Some(&mut page.profile.name),
            SettingsField::Email => Some(&mut page.profile.email),
            SettingsField::CurrentPassword => Some(&mut page.password.current),
            SettingsField::NewPassword => Some(&mut page.password.new),
            SettingsField::ConfirmPassword => Some(&mut page.password.confirm),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, state: &mut AppState, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                state.back();
            }
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Char('r') if ctrl => {
                if let Some(field) = password_field(self.focus) {
                    state.settings.password.toggle_visibility(field);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                if self.text_mut(state).is_none() =>
            {
                let prefs = &mut state.settings.preferences;
                match self.focus {
                    SettingsField::Language => prefs.language = prefs.language.cycle(),
                    SettingsField::PushNotifications => prefs.push_notifications = !prefs.push_notifications,
                    SettingsField::EmailNotifications => prefs.email_notifications = !prefs.email_notifications,
                    _ => {}
                }
            }
            // Both report success or failure as a notice
            KeyCode::Enter => match self.focus {
                SettingsField::Name | SettingsField::Email => {
                    state.save_profile().ok();
                }
                _ => {
                    state.change_password().ok();
                }
            },
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut(state) {
                    text.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(text) = self.text_mut(state) {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn field_style(&self, field: SettingsField) -> Style {
        if self.focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let page = &state.settings;
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(halves[0]);

        let boxed = |title: &'static str, value: String, field: SettingsField| {
            Paragraph::new(value).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(self.field_style(field)),
            )
        };

        f.render_widget(boxed("Name", page.profile.name.clone(), SettingsField::Name), left[0]);
        f.render_widget(boxed("Email", page.profile.email.clone(), SettingsField::Email), left[1]);
        let role = page.role.map_or("-", format_role);
        f.render_widget(
            Paragraph::new(role).block(Block::default().borders(Borders::ALL).title("Role (read-only)")),
            left[2],
        );
        for (i, (title, field, pw)) in [
            ("Current password", SettingsField::CurrentPassword, PasswordField::Current),
            ("New password", SettingsField::NewPassword, PasswordField::New),
            ("Confirm new password", SettingsField::ConfirmPassword, PasswordField::Confirm),
        ]
        .into_iter()
        .enumerate()
        {
            f.render_widget(boxed(title, page.password.display(pw), field), left[3 + i]);
        }
        f.render_widget(
            Paragraph::new(vec![
                Line::from("Enter on profile: Save profile"),
                Line::from("Enter on password: Change password | Ctrl+R: Show/hide"),
                Line::from("Tab: Next field | Esc: Back"),
            ])
            .style(Style::default().fg(Color::DarkGray)),
            left[6],
        );

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(halves[1]);
        let prefs = &page.preferences;
        let on_off = |b: bool| if b { "[x] on" } else { "[ ] off" }.to_string();
        f.render_widget(
            boxed(
                "Language",
                format!("◀ {} ({}) ▶", prefs.language.label(), prefs.language),
                SettingsField::Language,
            ),
            right[0],
        );
        f.render_widget(
            boxed("Push notifications", on_off(prefs.push_notifications), SettingsField::PushNotifications),
            right[1],
        );
        f.render_widget(
            boxed("Email notifications", on_off(prefs.email_notifications), SettingsField::EmailNotifications),
            right[2],
        );
        f.render_widget(
            Paragraph::new(vec![
                Line::from(format!("Member since: {}", page.member_since_label())),
                Line::from("Preferences are not saved between runs."),
            ])
            .block(Block::default().borders(Borders::ALL).title("Account")),
            right[3],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::route::Route;
    use crate::settings::Language;

    fn press(view: &mut SettingsView, state: &mut AppState, code: KeyCode) {
        view.handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn state() -> AppState {
        let mut state = AppState::new(Config::default());
        state.login("joao@example.com", "123456").unwrap();
        state.navigate(Route::Settings);
        state
    }

    #[test]
    fn test_edit_name_and_save() {
        let mut state = state();
        let mut view = SettingsView::default();
        press(&mut view, &mut state, KeyCode::Char('!'));
        assert_eq!(state.settings.profile.name, "João Silva!");
        press(&mut view, &mut state, KeyCode::Backspace);
        press(&mut view, &mut state, KeyCode::Enter);
        assert_eq!(state.notices.latest().unwrap().title, "Profile updated");
    }

    #[test]
    fn test_toggles_and_language() {
        let mut state = state();
        let mut view = SettingsView { focus: SettingsField::Language };
        press(&mut view, &mut state, KeyCode::Right);
        assert_eq!(state.settings.preferences.language, Language::En);
        press(&mut view, &mut state, KeyCode::Tab);
        press(&mut view, &mut state, KeyCode::Char(' '));
        assert!(!state.settings.preferences.push_notifications);
    }

    #[test]
    fn test_reveal_password() {
        let mut state = state();
        let mut view = SettingsView { focus: SettingsField::NewPassword };
        press(&mut view, &mut state, KeyCode::Char('x'));
        assert_eq!(state.settings.password.display(PasswordField::New), "•");
        view.handle_key(&mut state, KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(state.settings.password.display(PasswordField::New), "x");
    }
}
