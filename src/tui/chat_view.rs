//! Team chat screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::chat::format_time;
use crate::fields::MessageKind;
use crate::tui::input::InputField;

#[derive(Debug)]
pub struct ChatView {
    pub input: InputField,
}

impl Default for ChatView {
    fn default() -> Self {
        let mut input = InputField::new();
        input.active = true;
        ChatView { input }
    }
}

impl ChatView {
    pub fn handle_key(&mut self, state: &mut AppState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                state.back();
            }
            KeyCode::Enter => {
                if state.send_chat(&self.input.value).is_ok() {
                    self.input.clear();
                }
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let me = state.user().map(|u| u.id.as_str());
        let format = state.config.timestamp_format.as_str();
        let lines: Vec<Line> = state
            .chat
            .messages()
            .iter()
            .map(|m| {
                let time = Span::styled(
                    format!("{} ", format_time(m.timestamp, format)),
                    Style::default().fg(Color::DarkGray),
                );
                match m.kind {
                    MessageKind::System => Line::from(vec![
                        time,
                        Span::styled(m.content.clone(), Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)),
                    ]),
                    MessageKind::Text => {
                        let name_style = if Some(m.user_id.as_str()) == me {
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                        };
                        Line::from(vec![
                            time,
                            Span::styled(format!("{}: ", m.user_name), name_style),
                            Span::raw(m.content.clone()),
                        ])
                    }
                }
            })
            .collect();

        // Keep the newest messages in view
        let height = chunks[0].height.saturating_sub(2) as usize;
        let skip = lines.len().saturating_sub(height);
        let title = format!("{} ({} messages)", state.chat.name, state.chat.messages().len());
        f.render_widget(
            Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title)),
            chunks[0],
        );

        let prompt = if state.auth.is_authenticated() {
            "Message (Enter to send, Esc to go back)"
        } else {
            "Sign in to send messages (Esc to go back)"
        };
        f.render_widget(
            Paragraph::new(self.input.display()).block(Block::default().borders(Borders::ALL).title(prompt)),
            chunks[1],
        );
    }
}
