//! Task editor form for the terminal user interface.
//!
//! `TaskForm` holds the cursor-aware input widgets and field focus. The
//! values themselves live in the [`TaskEditor`]; every edit is copied back so
//! that saving always sees what is on screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::editor::{EditorMode, TaskEditor};
use crate::fields::{format_column, format_priority};
use crate::tui::colors::{column_color, priority_color};
use crate::tui::input::InputField;

/// Field order, top to bottom.
pub const TITLE_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const PRIORITY_ORDER: usize = 2;
pub const ASSIGNEE_ORDER: usize = 3;
pub const NEW_TAG_ORDER: usize = 4;
pub const TAGS_ORDER: usize = 5;
const FIELD_COUNT: usize = 6;

/// What a key press in the form asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Save,
    Delete,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub assignee: InputField,
    pub new_tag: InputField,
    pub current_field: usize,
    /// Highlighted tag when the tag list has focus.
    pub selected_tag: usize,
    /// The editor this form was built for.
    pub mode: EditorMode,
}

impl TaskForm {
    pub fn from_editor(editor: &TaskEditor) -> Self {
        let mut form = TaskForm {
            title: InputField::with_value(&editor.form.title),
            description: InputField::with_value(&editor.form.description),
            assignee: InputField::with_value(&editor.form.assignee),
            new_tag: InputField::with_value(&editor.form.new_tag),
            current_field: TITLE_ORDER,
            selected_tag: 0,
            mode: editor.mode.clone(),
        };
        form.update_active_field();
        form
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_ORDER;
        self.description.active = self.current_field == DESCRIPTION_ORDER;
        self.assignee.active = self.current_field == ASSIGNEE_ORDER;
        self.new_tag.active = self.current_field == NEW_TAG_ORDER;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            DESCRIPTION_ORDER => Some(&mut self.description),
            ASSIGNEE_ORDER => Some(&mut self.assignee),
            NEW_TAG_ORDER => Some(&mut self.new_tag),
            _ => None,
        }
    }

    /// Copy the text inputs into the editor.
    fn sync(&self, editor: &mut TaskEditor) {
        editor.form.title = self.title.value.clone();
        editor.form.description = self.description.value.clone();
        editor.form.assignee = self.assignee.value.clone();
        editor.form.new_tag = self.new_tag.value.clone();
    }

    pub fn handle_key(&mut self, editor: &mut TaskEditor, key: KeyEvent) -> FormAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Char('s') if ctrl => {
                self.sync(editor);
                return FormAction::Save;
            }
            KeyCode::Char('d') if ctrl => return FormAction::Delete,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Enter => match self.current_field {
                NEW_TAG_ORDER => {
                    self.sync(editor);
                    if editor.add_tag() {
                        self.new_tag.clear();
                    }
                }
                _ => self.next_field(),
            },
            KeyCode::Left | KeyCode::Right => {
                let right = key.code == KeyCode::Right;
                match self.current_field {
                    PRIORITY_ORDER => editor.form.priority = editor.form.priority.cycle(right),
                    TAGS_ORDER => {
                        let count = editor.form.tags.len();
                        if right && self.selected_tag + 1 < count {
                            self.selected_tag += 1;
                        } else if !right {
                            self.selected_tag = self.selected_tag.saturating_sub(1);
                        }
                    }
                    _ => {
                        if let Some(input) = self.active_input() {
                            if right {
                                input.move_cursor_right();
                            } else {
                                input.move_cursor_left();
                            }
                        }
                    }
                }
            }
            KeyCode::Backspace | KeyCode::Delete if self.current_field == TAGS_ORDER => {
                if let Some(tag) = editor.form.tags.get(self.selected_tag).cloned() {
                    editor.remove_tag(&tag);
                    let count = editor.form.tags.len();
                    self.selected_tag = self.selected_tag.min(count.saturating_sub(1));
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.active_input() {
                    input.handle_backspace();
                }
            }
            KeyCode::Delete => {
                if let Some(input) = self.active_input() {
                    input.handle_delete();
                }
            }
            KeyCode::Home => {
                if let Some(input) = self.active_input() {
                    input.move_home();
                }
            }
            KeyCode::End => {
                if let Some(input) = self.active_input() {
                    input.move_end();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(input) = self.active_input() {
                    input.handle_char(c);
                }
            }
            _ => {}
        }
        self.sync(editor);
        FormAction::None
    }

    pub fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let Some(editor) = state.editor.as_ref() else {
            return;
        };
        let (heading, accent) = match &editor.mode {
            EditorMode::Create { column } => (
                format!("New task in {}", format_column(*column)),
                column_color(*column),
            ),
            EditorMode::Edit { id } => {
                let column = state.board.find_column_of(id).unwrap_or_default();
                (format!("Edit task #{id}"), column_color(column))
            }
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(heading)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title
                Constraint::Length(5), // description
                Constraint::Length(3), // priority
                Constraint::Length(3), // assignee
                Constraint::Length(3), // new tag
                Constraint::Length(3), // tags
                Constraint::Min(0),
            ])
            .split(inner);

        let field_block = |title: &'static str, order: usize| {
            let style = if self.current_field == order {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Block::default().borders(Borders::ALL).title(title).border_style(style)
        };

        f.render_widget(
            Paragraph::new(self.title.display()).block(field_block("Title *", TITLE_ORDER)),
            rows[0],
        );
        f.render_widget(
            Paragraph::new(self.description.display())
                .wrap(Wrap { trim: false })
                .block(field_block("Description", DESCRIPTION_ORDER)),
            rows[1],
        );

        let priority = editor.form.priority;
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("◀ "),
                Span::styled(
                    format_priority(priority),
                    Style::default().fg(priority_color(priority)).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" ▶"),
            ]))
            .block(field_block("Priority", PRIORITY_ORDER)),
            rows[2],
        );
        f.render_widget(
            Paragraph::new(self.assignee.display()).block(field_block("Assignee", ASSIGNEE_ORDER)),
            rows[3],
        );
        f.render_widget(
            Paragraph::new(self.new_tag.display()).block(field_block("Add tag (Enter)", NEW_TAG_ORDER)),
            rows[4],
        );

        let mut tag_spans = Vec::new();
        for (i, tag) in editor.form.tags.iter().enumerate() {
            let style = if self.current_field == TAGS_ORDER && i == self.selected_tag {
                Style::default().bg(accent).fg(Color::Black)
            } else {
                Style::default().fg(Color::Cyan)
            };
            tag_spans.push(Span::styled(format!("[{tag}]"), style));
            tag_spans.push(Span::raw(" "));
        }
        if tag_spans.is_empty() {
            tag_spans.push(Span::styled("no tags", Style::default().fg(Color::DarkGray)));
        }
        f.render_widget(
            Paragraph::new(Line::from(tag_spans)).block(field_block("Tags (Del removes)", TAGS_ORDER)),
            rows[5],
        );

        let mut help = vec![Line::from("Ctrl+S: Save | Tab: Next field | Esc: Cancel")];
        if editor.is_editing() {
            help.push(Line::from("Ctrl+D: Delete task"));
        }
        if let Some(created) = editor.created_at {
            help.push(Line::from(format!("Created {}", created.format("%Y-%m-%d %H:%M"))));
        }
        f.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            rows[6],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{ColumnId, Priority};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut TaskForm, editor: &mut TaskEditor, text: &str) {
        for c in text.chars() {
            form.handle_key(editor, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_flows_into_editor() {
        let mut editor = TaskEditor::create(Some(ColumnId::Doing));
        let mut form = TaskForm::from_editor(&editor);
        type_text(&mut form, &mut editor, "Write spec");
        assert_eq!(editor.form.title, "Write spec");

        form.handle_key(&mut editor, key(KeyCode::Tab));
        form.handle_key(&mut editor, key(KeyCode::Tab));
        form.handle_key(&mut editor, key(KeyCode::Right));
        assert_eq!(editor.form.priority, Priority::High);
    }

    #[test]
    fn test_tags_add_and_remove() {
        let mut editor = TaskEditor::create(None);
        let mut form = TaskForm::from_editor(&editor);
        form.current_field = NEW_TAG_ORDER;
        for tag in ["docs", "urgent", "docs"] {
            type_text(&mut form, &mut editor, tag);
            form.handle_key(&mut editor, key(KeyCode::Enter));
        }
        assert_eq!(editor.form.tags, vec!["docs".to_string(), "urgent".to_string()]);
        assert_eq!(form.new_tag.value, "docs");

        form.new_tag.clear();
        form.current_field = TAGS_ORDER;
        form.handle_key(&mut editor, key(KeyCode::Right));
        form.handle_key(&mut editor, key(KeyCode::Delete));
        assert_eq!(editor.form.tags, vec!["docs".to_string()]);
        assert_eq!(form.selected_tag, 0);
    }

    #[test]
    fn test_control_keys() {
        let mut editor = TaskEditor::create(None);
        let mut form = TaskForm::from_editor(&editor);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(form.handle_key(&mut editor, ctrl_s), FormAction::Save);
        assert_eq!(form.handle_key(&mut editor, key(KeyCode::Esc)), FormAction::Cancel);
        form.prev_field();
        assert_eq!(form.current_field, TAGS_ORDER);
    }
}
