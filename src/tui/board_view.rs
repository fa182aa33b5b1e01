//! Kanban board screen.
//!
//! Three columns side by side on wide terminals. Below the configured
//! compact width only the active column is drawn, with a tab strip above it
//! and horizontal mouse drags across the column switching tabs. Dragging a
//! card sideways past the swipe threshold moves the card instead.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::config::Config;
use crate::fields::{format_column, format_priority, ColumnId, SwipeDirection};
use crate::notice::Notice;
use crate::route::Route;
use crate::swipe::{ColumnNavigator, SwipeTracker};
use crate::task::Task;
use crate::tui::colors::{column_color, priority_color, text_on, CARD_BG};
use crate::tui::utils::{centered_rect, contains, truncate, wrap_words};

const CARD_HEIGHT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    None,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Press {
    Card(String),
    Column,
}

#[derive(Debug)]
pub struct BoardView {
    navigator: ColumnNavigator,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    pub show_task_detail: bool,
    pub filter_active: bool,
    pub filter_text: String,
    swipe: SwipeTracker,
    pressed: Option<Press>,
    cell_width_px: i32,
    /// Card rectangles from the last render, for mouse hit-testing.
    card_hits: Vec<(Rect, String)>,
    board_area: Rect,
    compact: bool,
}

impl BoardView {
    pub fn new(config: &Config) -> Self {
        BoardView {
            navigator: ColumnNavigator::default(),
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            show_task_detail: false,
            filter_active: false,
            filter_text: String::new(),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            pressed: None,
            cell_width_px: i32::from(config.cell_width_px),
            card_hits: Vec::new(),
            board_area: Rect::default(),
            compact: false,
        }
    }

    pub fn selected_column(&self) -> ColumnId {
        self.navigator.active()
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Task ids per column after the text filter.
    fn visible(&self, state: &AppState) -> [Vec<String>; 3] {
        let mut out: [Vec<String>; 3] = Default::default();
        for view in state.board.filter(&self.filter_text) {
            out[view.id.index()] = view.tasks.iter().map(|t| t.id.clone()).collect();
        }
        out
    }

    pub fn selected_task_id(&self, state: &AppState) -> Option<String> {
        self.visible(state)[self.selected_column().index()]
            .get(self.selected_card)
            .cloned()
    }

    fn clamp_selection(&mut self, state: &AppState) {
        let len = self.visible(state)[self.selected_column().index()].len();
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    /// Put the selection on `id`, wherever it now lives.
    fn select_task(&mut self, state: &AppState, id: &str) {
        if let Some(column) = state.board.find_column_of(id) {
            self.navigator.select(column);
            let visible = self.visible(state);
            self.selected_card = visible[column.index()]
                .iter()
                .position(|t| t == id)
                .unwrap_or(0);
        }
        self.clamp_selection(state);
    }

    fn move_selected(&mut self, state: &mut AppState, direction: SwipeDirection) {
        let Some(id) = self.selected_task_id(state) else {
            return;
        };
        self.move_card(state, &id, direction);
    }

    fn move_card(&mut self, state: &mut AppState, id: &str, direction: SwipeDirection) {
        if state.swipe_card(id, direction) {
            self.select_task(state, id);
            state.notices.push(Notice::info(format!(
                "Moved task to {}",
                format_column(self.selected_column())
            )));
        }
    }

    pub fn handle_key(&mut self, state: &mut AppState, key: KeyEvent) -> BoardAction {
        if self.filter_active {
            match key.code {
                KeyCode::Esc => {
                    self.filter_active = false;
                    self.filter_text.clear();
                }
                KeyCode::Enter => {
                    self.filter_active = false;
                    if !self.filter_text.is_empty() {
                        let shown: usize = self.visible(state).iter().map(Vec::len).sum();
                        state.notices.push(Notice::info(format!(
                            "Filter: '{}' ({} tasks shown)",
                            self.filter_text, shown
                        )));
                    }
                }
                KeyCode::Backspace => {
                    self.filter_text.pop();
                }
                KeyCode::Char(c) => self.filter_text.push(c),
                _ => {}
            }
            self.clamp_selection(state);
            return BoardAction::None;
        }

        if self.show_task_detail {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.show_task_detail = false;
            }
            return BoardAction::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return BoardAction::Quit,
            KeyCode::Enter => {
                self.show_task_detail = self.selected_task_id(state).is_some();
            }

            // Card movement, checked before plain column navigation
            KeyCode::Left if ctrl => self.move_selected(state, SwipeDirection::Right),
            KeyCode::Right if ctrl => self.move_selected(state, SwipeDirection::Left),

            KeyCode::Left => {
                if self.navigator.prev() {
                    self.clamp_selection(state);
                }
            }
            KeyCode::Right => {
                if self.navigator.next() {
                    self.clamp_selection(state);
                }
            }
            KeyCode::Up => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.visible(state)[self.selected_column().index()].len();
                if len > 0 && self.selected_card < len - 1 {
                    self.selected_card += 1;
                }
            }

            KeyCode::Char('n') => state.open_new_task(self.selected_column()),
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_task_id(state) {
                    state.open_edit_task(&id);
                }
            }
            KeyCode::Char('/') => {
                self.filter_active = true;
            }
            KeyCode::Char('c') => state.navigate(Route::Chat),
            KeyCode::Char('s') => state.navigate(Route::Settings),
            KeyCode::Char('b') => state.navigate(Route::Boards),
            KeyCode::Char('o') => state.logout(),
            KeyCode::Char('h') => state.notices.push(Notice::info(
                "Help: n: New | e: Edit | Enter: Details | Ctrl+←/→: Move | /: Filter | c: Chat | b: Boards | s: Settings | o: Log out | q: Quit",
            )),
            _ => {}
        }
        BoardAction::None
    }

    fn card_at(&self, column: u16, row: u16) -> Option<String> {
        self.card_hits
            .iter()
            .find(|(rect, _)| contains(*rect, column, row))
            .map(|(_, id)| id.clone())
    }

    pub fn handle_mouse(&mut self, state: &mut AppState, mouse: MouseEvent) {
        let px = i32::from(mouse.column) * self.cell_width_px;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !contains(self.board_area, mouse.column, mouse.row) {
                    return;
                }
                self.pressed = Some(match self.card_at(mouse.column, mouse.row) {
                    Some(id) => Press::Card(id),
                    None => Press::Column,
                });
                self.swipe.press(px);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.swipe.drag(px),
            MouseEventKind::Up(MouseButton::Left) => {
                let direction = self.swipe.release(px);
                match (self.pressed.take(), direction) {
                    (Some(Press::Card(id)), Some(direction)) => self.move_card(state, &id, direction),
                    (Some(Press::Card(id)), None) => self.select_task(state, &id),
                    (Some(Press::Column), Some(direction)) if self.compact => {
                        if self.navigator.step(direction) {
                            self.clamp_selection(state);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    pub fn status_hint(&self, state: &AppState) -> String {
        if self.filter_active {
            return format!("Filter: {} | Type to search, Enter to apply, Esc to cancel", self.filter_text);
        }
        let total: usize = self.visible(state).iter().map(Vec::len).sum();
        let filter = if self.filter_text.is_empty() {
            String::new()
        } else {
            format!(" [Filter: {}]", self.filter_text)
        };
        format!("Tasks: {total}{filter} | n: New | e: Edit | Ctrl+←/→: Move | /: Filter | h: Help")
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState) {
        self.compact = area.width < state.config.compact_width;
        self.board_area = area;
        self.card_hits.clear();
        self.clamp_selection(state);
        let visible = self.visible(state);

        if self.compact {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(area);
            self.render_tabs(f, chunks[0], &visible);
            let active = self.selected_column();
            self.render_column(f, chunks[1], active, &visible[active.index()], state);
        } else {
            let columns_layout = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(area);
            for column in ColumnId::ALL {
                self.render_column(f, columns_layout[column.index()], column, &visible[column.index()], state);
            }
        }

        if self.show_task_detail {
            if let Some(task) = self.selected_task_id(state).and_then(|id| state.board.find_task(&id)) {
                self.render_task_detail_popup(f, task);
            }
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect, visible: &[Vec<String>; 3]) {
        let active = self.selected_column();
        let titles: Vec<String> = ColumnId::ALL
            .iter()
            .map(|c| format!("{} ({})", format_column(*c), visible[c.index()].len()))
            .collect();
        let prev = if active.prev().is_some() { "◀ " } else { "  " };
        let next = if active.next().is_some() { " ▶" } else { "  " };
        let tabs = Tabs::new(titles)
            .select(active.index())
            .block(Block::default().borders(Borders::ALL).title(format!("{prev}Columns{next}")))
            .highlight_style(
                Style::default()
                    .fg(column_color(active))
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        f.render_widget(tabs, area);
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column: ColumnId, cards: &[String], state: &AppState) {
        let is_selected = column == self.selected_column();
        let color = column_color(column);
        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", format_column(column), cards.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        if cards.is_empty() {
            let hint = if is_selected { "No tasks. Press n to add one." } else { "No tasks" };
            f.render_widget(
                Paragraph::new(hint)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = (available_height / CARD_HEIGHT).max(1);
        let slot = column.index();

        // Keep the selected card in view
        let scroll_offset = if is_selected {
            let start = self.column_scroll_offsets[slot];
            if self.selected_card < start {
                self.selected_card
            } else if self.selected_card >= start + visible_cards {
                self.selected_card + 1 - visible_cards
            } else {
                start
            }
        } else {
            self.column_scroll_offsets[slot].min(cards.len() - 1)
        };
        self.column_scroll_offsets[slot] = scroll_offset;

        let mut current_y = 0;
        let mut rendered = 0;
        for (card_index, id) in cards.iter().enumerate().skip(scroll_offset) {
            let Some(task) = state.board.find_task(id) else {
                continue;
            };
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: CARD_HEIGHT as u16,
            };
            self.render_card(f, card_area, task, column, is_selected && card_index == self.selected_card);
            self.card_hits.push((card_area, task.id.clone()));
            current_y += CARD_HEIGHT;
            rendered += 1;
        }

        if scroll_offset > 0 {
            f.render_widget(
                Paragraph::new(format!("▲ +{scroll_offset} above")).style(Style::default().fg(Color::Cyan)),
                Rect { height: 1, ..inner },
            );
        }
        let remaining = cards.len().saturating_sub(scroll_offset + rendered);
        if remaining > 0 && inner.height > 0 {
            f.render_widget(
                Paragraph::new(format!("▼ +{remaining} below")).style(Style::default().fg(Color::Cyan)),
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn render_card(&self, f: &mut Frame, area: Rect, task: &Task, column: ColumnId, is_selected: bool) {
        let color = column_color(column);
        let style = if is_selected {
            Style::default().bg(color).fg(text_on(color)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(CARD_BG)
        };

        let width = area.width.saturating_sub(2) as usize;
        let mut lines = vec![Line::from(vec![
            Span::raw(format!("#{} ", truncate(&task.id, 8))),
            Span::styled(
                format_priority(task.priority),
                Style::default().fg(priority_color(task.priority)),
            ),
        ])];
        for line in wrap_words(&task.title, width, 2) {
            lines.push(Line::from(line));
        }
        let tags = if task.tags.is_empty() {
            String::new()
        } else {
            format!(" | {}", task.tags.join(", "))
        };
        lines.push(Line::from(truncate(
            &format!("{}{}", task.assignee.as_deref().unwrap_or("-"), tags),
            width,
        )));

        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .style(style),
            area,
        );
    }

    fn render_task_detail_popup(&self, f: &mut Frame, task: &Task) {
        let popup_area = centered_rect(80, 80, f.area());
        f.render_widget(Clear, popup_area);

        let tags = if task.tags.is_empty() {
            "-".to_string()
        } else {
            task.tags.join(", ")
        };
        let detail_lines = vec![
            Line::from(Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Column:    {}", format_column(self.selected_column()))),
            Line::from(format!("Priority:  {}", format_priority(task.priority))),
            Line::from(format!("Assignee:  {}", task.assignee.as_deref().unwrap_or("-"))),
            Line::from(format!("Tags:      {tags}")),
            Line::from(format!("Created:   {}", task.created_at.format("%Y-%m-%d %H:%M"))),
            Line::from(format!("Updated:   {}", task.updated_at.format("%Y-%m-%d %H:%M"))),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.as_deref().unwrap_or("-").to_string()),
        ];

        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Enter to close, e to edit)")
            .title_alignment(Alignment::Center)
            .border_style(
                Style::default()
                    .fg(column_color(self.selected_column()))
                    .add_modifier(Modifier::BOLD),
            );

        f.render_widget(
            Paragraph::new(detail_lines)
                .block(popup_block)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(Color::Black)),
            popup_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn signed_in() -> AppState {
        let mut state = AppState::new(Config::default());
        state.login("joao@example.com", "123456").unwrap();
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(view: &mut BoardView, state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| view.render(f, f.area(), state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_three_columns_when_wide() {
        let state = signed_in();
        let mut view = BoardView::new(&state.config);
        let screen = draw(&mut view, &state, 120, 30);
        assert!(!view.is_compact());
        assert!(screen.contains("To Do (2)"));
        assert!(screen.contains("Doing (1)"));
        assert!(screen.contains("Done (1)"));
        assert!(screen.contains("Landing page"));
    }

    #[test]
    fn test_compact_shows_tab_strip() {
        let state = signed_in();
        let mut view = BoardView::new(&state.config);
        let screen = draw(&mut view, &state, 60, 30);
        assert!(view.is_compact());
        assert!(screen.contains("Columns ▶"));
        assert!(screen.contains("Set up database"));
        assert!(!screen.contains("Initial project setup"));
    }

    #[test]
    fn test_ctrl_arrows_move_selected_card() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        let ctrl_right = KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL);
        view.handle_key(&mut state, ctrl_right);
        assert_eq!(state.board.find_column_of("1"), Some(ColumnId::Doing));
        assert_eq!(view.selected_column(), ColumnId::Doing);
        assert_eq!(view.selected_task_id(&state).as_deref(), Some("1"));
    }

    #[test]
    fn test_filter_mode() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        view.handle_key(&mut state, key(KeyCode::Char('/')));
        for c in "auth".chars() {
            view.handle_key(&mut state, key(KeyCode::Char(c)));
        }
        view.handle_key(&mut state, key(KeyCode::Enter));
        assert!(!view.filter_active);
        let visible = view.visible(&state);
        assert!(visible[0].is_empty());
        assert_eq!(visible[1], vec!["3".to_string()]);
        assert!(state.notices.latest().unwrap().title.contains("1 tasks shown"));
    }

    #[test]
    fn test_arrow_navigation_does_not_wrap() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        view.handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(view.selected_column(), ColumnId::Todo);
        view.handle_key(&mut state, key(KeyCode::Right));
        view.handle_key(&mut state, key(KeyCode::Right));
        view.handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(view.selected_column(), ColumnId::Done);
    }

    #[test]
    fn test_mouse_swipe_on_card_moves_it() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        draw(&mut view, &state, 120, 30);
        let (rect, id) = view.card_hits[0].clone();
        assert_eq!(id, "1");
        let (x, y) = (rect.x + rect.width - 2, rect.y + 1);
        // 10 cells at 8px each is past the 60px threshold
        view.handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        view.handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), x - 5, y));
        view.handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), x - 10, y));
        view.handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), x - 10, y));
        assert_eq!(state.board.find_column_of("1"), Some(ColumnId::Doing));
    }

    fn drag_left(view: &mut BoardView, state: &mut AppState, x: u16, y: u16) {
        view.handle_mouse(state, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        view.handle_mouse(state, mouse(MouseEventKind::Drag(MouseButton::Left), x - 5, y));
        view.handle_mouse(state, mouse(MouseEventKind::Drag(MouseButton::Left), x - 10, y));
        view.handle_mouse(state, mouse(MouseEventKind::Up(MouseButton::Left), x - 10, y));
    }

    #[test]
    fn test_compact_swipe_steps_visible_column() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        // Row 1 is the tab strip: inside the board, outside every card.
        for expected in [ColumnId::Doing, ColumnId::Done, ColumnId::Done] {
            draw(&mut view, &state, 60, 30);
            assert!(view.is_compact());
            drag_left(&mut view, &mut state, 40, 1);
            assert_eq!(view.selected_column(), expected);
        }
        assert_eq!(state.board.task_count(), 4);
        assert_eq!(state.board.find_column_of("1"), Some(ColumnId::Todo));
    }

    #[test]
    fn test_wide_column_swipe_does_nothing() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        draw(&mut view, &state, 120, 30);
        assert!(!view.is_compact());
        // Empty space under the cards of the first column
        drag_left(&mut view, &mut state, 30, 27);
        assert_eq!(view.selected_column(), ColumnId::Todo);
        assert_eq!(state.board.find_column_of("1"), Some(ColumnId::Todo));
    }

    #[test]
    fn test_short_drag_only_selects() {
        let mut state = signed_in();
        let mut view = BoardView::new(&state.config);
        draw(&mut view, &state, 120, 30);
        let (rect, id) = view.card_hits[1].clone();
        let (x, y) = (rect.x + 2, rect.y + 1);
        view.handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        view.handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), x + 2, y));
        assert_eq!(state.board.find_column_of(&id), Some(ColumnId::Todo));
        assert_eq!(view.selected_task_id(&state), Some(id));
    }
}
