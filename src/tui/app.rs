//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, routes
//! keyboard input, and renders the single screen: creation form, active
//! task list with sort controls, completed task list, footer and status bar.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::fields::{Priority, Section, SortType};
use crate::store::{format_deadline, TaskStore};
use crate::task::Task;
use crate::tui::{
    colors::{HIGH_RED, LOW_GREEN, MEDIUM_GOLD},
    enums::AppState,
    task_form::{TaskForm, DEADLINE_FIELD, PRIORITY_FIELD, TITLE_FIELD},
};

/// Main application state for the terminal user interface.
///
/// Owns the task store and all view state: which screen region has focus,
/// the list selections, the creation form draft, and the status message.
pub struct App {
    store: TaskStore,
    state: AppState,
    focus: Section,
    form: TaskForm,
    active_state: ListState,
    completed_state: ListState,
    status_message: String,
}

impl App {
    /// Create a new App with an empty store and initial section visibility.
    pub fn new() -> Self {
        App {
            store: TaskStore::new(),
            state: AppState::Browse,
            focus: Section::Active,
            form: TaskForm::new(),
            active_state: ListState::default(),
            completed_state: ListState::default(),
            status_message: String::new(),
        }
    }

    /// Set a status message to display in the status bar.
    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Clamp both list selections to the current derived snapshots.
    fn sync_selection(&mut self) {
        let active_len = self.store.active_tasks().len();
        Self::clamp_selection(&mut self.active_state, active_len);
        let completed_len = self.store.completed_tasks().len();
        Self::clamp_selection(&mut self.completed_state, completed_len);
    }

    fn clamp_selection(state: &mut ListState, len: usize) {
        if len == 0 {
            state.select(None);
            return;
        }
        match state.selected() {
            None => state.select(Some(0)),
            Some(i) if i >= len => state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Id of the selected task in the focused list, if any.
    fn selected_id(&self) -> Option<u64> {
        let (tasks, state) = match self.focus {
            Section::Active => (self.store.active_tasks(), &self.active_state),
            Section::Completed => (self.store.completed_tasks(), &self.completed_state),
            Section::Form => return None,
        };
        state.selected().and_then(|i| tasks.get(i)).map(|t| t.id)
    }

    /// Move the selection in the focused list by one row.
    fn move_selection(&mut self, down: bool) {
        let (len, state) = match self.focus {
            Section::Active => (self.store.active_tasks().len(), &mut self.active_state),
            Section::Completed => (
                self.store.completed_tasks().len(),
                &mut self.completed_state,
            ),
            Section::Form => return,
        };
        if len == 0 {
            return;
        }
        let next = match state.selected() {
            None => 0,
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
        };
        state.select(Some(next));
    }

    /// Complete the selected active task.
    fn complete_selected(&mut self) {
        if self.focus != Section::Active {
            return;
        }
        if let Some(id) = self.selected_id() {
            self.store.complete_task(id);
            self.sync_selection();
            self.set_status_message("Task completed".to_string());
        }
    }

    /// Delete the selected task from whichever list has focus.
    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.delete_task(id);
            self.sync_selection();
            self.set_status_message("Task deleted".to_string());
        }
    }

    /// Apply a sort request and report the resulting state.
    fn request_sort(&mut self, sort_type: SortType) {
        self.store.toggle_sort(sort_type);
        self.set_status_message(format!(
            "Sort: {} {}",
            self.store.sort_type().label(),
            self.store.sort_order().arrow()
        ));
    }

    /// Open the creation form and start editing it.
    fn enter_form(&mut self) {
        self.store.open_section(Section::Form);
        self.focus = Section::Form;
        self.form.update_active_field();
        self.state = AppState::EditForm;
    }

    /// Handle keyboard input when browsing between sections.
    ///
    /// Returns true if the application should quit.
    fn handle_browse_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.state = AppState::Help;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
            }
            KeyCode::Char('1') => self.store.toggle_section(Section::Form),
            KeyCode::Char('2') => self.store.toggle_section(Section::Active),
            KeyCode::Char('3') => self.store.toggle_section(Section::Completed),
            KeyCode::Char(' ') => self.store.toggle_section(self.focus),
            KeyCode::Char('a') => self.enter_form(),
            KeyCode::Char('d') => self.request_sort(SortType::Date),
            KeyCode::Char('p') => self.request_sort(SortType::Priority),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Enter => match self.focus {
                Section::Form => self.enter_form(),
                Section::Active => self.complete_selected(),
                Section::Completed => {}
            },
            KeyCode::Char('c') => self.complete_selected(),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input while the creation form is being edited.
    fn handle_form_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::Browse;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => {
                // Invalid drafts are kept in place with no error surfaced.
                if let Some((title, priority, deadline)) = self.form.take_submission() {
                    self.store.add_task(title.clone(), priority, deadline);
                    self.sync_selection();
                    self.set_status_message(format!("Added task '{}'", title));
                }
            }
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input on the help overlay.
    fn handle_help_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('q') => return Ok(true),
            _ => self.state = AppState::Browse,
        }
        Ok(false)
    }

    /// Poll for a key event and dispatch it to the current state's handler.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.status_message.clear();

                let should_quit = match self.state {
                    AppState::Browse => self.handle_browse_input(key.code, key.modifiers)?,
                    AppState::EditForm => self.handle_form_input(key.code, key.modifiers)?,
                    AppState::Help => self.handle_help_input(key.code, key.modifiers)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Border style for a section block, highlighted when focused.
    fn section_border(&self, section: Section) -> Style {
        if self.focus == section && self.state != AppState::Help {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    /// Color used for a priority tag.
    fn priority_color(priority: Priority) -> Color {
        match priority {
            Priority::High => HIGH_RED,
            Priority::Medium => MEDIUM_GOLD,
            Priority::Low => LOW_GREEN,
        }
    }

    /// One list row: priority tag, title, deadline.
    fn task_line(task: &Task, dim: bool) -> Line<'_> {
        let tag_style = if dim {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Self::priority_color(task.priority))
                .add_modifier(Modifier::BOLD)
        };
        let text_style = if dim {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(format!("[{:<6}] ", task.priority.label()), tag_style),
            Span::styled(task.title.as_str(), text_style),
            Span::styled(
                format!("  due {}", format_deadline(task.deadline)),
                Style::default().fg(Color::Cyan),
            ),
        ])
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "TASK LIST WITH PRIORITY",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                if self.store.is_empty() {
                    "no tasks yet".to_string()
                } else {
                    format!(
                        "{} active, {} completed",
                        self.store.active_tasks().len(),
                        self.store.completed_tasks().len()
                    )
                },
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Title bar text for a section, with its open/closed marker.
    fn section_title(&self, section: Section) -> String {
        let marker = if self.store.is_open(section) {
            "[-]"
        } else {
            "[+]"
        };
        match section {
            Section::Form => format!("[1] {} {}", section.title(), marker),
            Section::Active => format!(
                "[2] {} ({})  sort: {} {} {}",
                section.title(),
                self.store.active_tasks().len(),
                self.store.sort_type().label(),
                self.store.sort_order().arrow(),
                marker
            ),
            Section::Completed => format!(
                "[3] {} ({}) {}",
                section.title(),
                self.store.completed_tasks().len(),
                marker
            ),
        }
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.section_border(Section::Form))
            .title(self.section_title(Section::Form));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if !self.store.is_open(Section::Form) {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let editing = self.state == AppState::EditForm;
        let field_style = |active: bool| {
            if editing && active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }
        };

        let title_line = Line::from(vec![
            Span::styled("Title:    ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                self.form.title.value.as_str(),
                field_style(self.form.current_field == TITLE_FIELD),
            ),
        ]);
        f.render_widget(Paragraph::new(title_line), rows[0]);

        let mut priority_style =
            Style::default().fg(Self::priority_color(self.form.selected_priority()));
        if editing && self.form.current_field == PRIORITY_FIELD {
            priority_style = priority_style.add_modifier(Modifier::REVERSED);
        }
        let priority_line = Line::from(vec![
            Span::styled("Priority: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("< {} >", self.form.selected_priority().label()),
                priority_style,
            ),
        ]);
        f.render_widget(Paragraph::new(priority_line), rows[1]);

        let deadline_line = Line::from(vec![
            Span::styled("Deadline: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                self.form.deadline.value.as_str(),
                field_style(self.form.current_field == DEADLINE_FIELD),
            ),
            Span::styled(
                "  (YYYY-MM-DD HH:MM)",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(Paragraph::new(deadline_line), rows[2]);

        let hint = if editing {
            "Enter: add task   Tab: next field   Esc: done"
        } else {
            "Press Enter or 'a' to start typing"
        };
        f.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
            rows[3],
        );

        // Show the terminal cursor inside the active text field.
        if editing {
            let label_width = 10u16;
            match self.form.current_field {
                TITLE_FIELD => f.set_cursor_position(Position::new(
                    rows[0].x + label_width + self.form.title.cursor as u16,
                    rows[0].y,
                )),
                DEADLINE_FIELD => f.set_cursor_position(Position::new(
                    rows[2].x + label_width + self.form.deadline.cursor as u16,
                    rows[2].y,
                )),
                _ => {}
            }
        }
    }

    fn render_active(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.section_border(Section::Active))
            .title(self.section_title(Section::Active));

        if !self.store.is_open(Section::Active) {
            f.render_widget(block, area);
            return;
        }

        let tasks = self.store.active_tasks();
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|t| ListItem::new(Self::task_line(t, false)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.active_state);
    }

    fn render_completed(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.section_border(Section::Completed))
            .title(self.section_title(Section::Completed));

        if !self.store.is_open(Section::Completed) {
            f.render_widget(block, area);
            return;
        }

        let tasks = self.store.completed_tasks();
        let items: Vec<ListItem> = tasks
            .iter()
            .map(|t| ListItem::new(Self::task_line(t, true)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, area, &mut self.completed_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new(Span::styled(
            "Built with Rust, ratatui and crossterm. One screen, three sections, keyboard only.",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        f.render_widget(footer, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::Browse => {
                    "Tab: focus | Space/1/2/3: fold | d/p: sort | c: complete | x: delete | a: add | h: help | q: quit"
                        .to_string()
                }
                AppState::EditForm => "New Task | Enter: add | Esc: done".to_string(),
                AppState::Help => "Help | any key to return".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 70, area);
        f.render_widget(Clear, popup);

        let text = vec![
            Line::from(Span::styled(
                "Key bindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Tab / Shift-Tab   move focus between sections"),
            Line::from("Space, 1/2/3      fold or unfold a section"),
            Line::from("a, Enter on form  open the form and start typing"),
            Line::from("Up/Down, j/k      move the list selection"),
            Line::from("d                 sort active tasks by date"),
            Line::from("p                 sort active tasks by priority"),
            Line::from("                  (same key again flips the order)"),
            Line::from("c, Enter          complete the selected active task"),
            Line::from("x, Del            delete the selected task"),
            Line::from("h, ?              this help"),
            Line::from("q, Esc            quit (nothing is saved)"),
        ];

        let help = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, popup);
    }

    /// Main render function laying out the single screen.
    fn render(&mut self, f: &mut Frame) {
        let form_h = if self.store.is_open(Section::Form) { 6 } else { 3 };
        let completed_h = if self.store.is_open(Section::Completed) {
            8
        } else {
            3
        };
        let active_constraint = if self.store.is_open(Section::Active) {
            Constraint::Min(5)
        } else {
            Constraint::Length(3)
        };

        let mut constraints = vec![
            Constraint::Length(3), // header
            Constraint::Length(form_h),
            active_constraint,
            Constraint::Length(completed_h),
        ];
        if !self.store.is_open(Section::Active) {
            // Soak up leftover rows so the footer stays at the bottom.
            constraints.push(Constraint::Min(0));
        }
        constraints.push(Constraint::Length(1)); // footer
        constraints.push(Constraint::Length(1)); // status bar

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_form(f, chunks[1]);
        self.render_active(f, chunks[2]);
        self.render_completed(f, chunks[3]);
        let footer_idx = chunks.len() - 2;
        self.render_footer(f, chunks[footer_idx]);
        self.render_status_bar(f, chunks[footer_idx + 1]);

        if self.state == AppState::Help {
            let area = f.area();
            self.render_help(f, area);
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Centered sub-rectangle taking the given percentages of the area.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn app_with_tasks(n: usize) -> App {
        let mut app = App::new();
        for i in 0..n {
            app.store
                .add_task(format!("task {}", i), Priority::Low, dt("2025-06-01 09:00"));
        }
        app.sync_selection();
        app
    }

    #[test]
    fn test_selection_clamps_after_delete() {
        let mut app = app_with_tasks(2);
        app.active_state.select(Some(1));

        app.delete_selected();
        assert_eq!(app.active_state.selected(), Some(0));

        app.delete_selected();
        assert_eq!(app.active_state.selected(), None);
    }

    #[test]
    fn test_complete_selected_moves_task_and_selection_follows() {
        let mut app = app_with_tasks(1);
        assert_eq!(app.active_state.selected(), Some(0));

        app.complete_selected();
        assert_eq!(app.active_state.selected(), None);
        assert_eq!(app.completed_state.selected(), Some(0));
        assert_eq!(app.store.completed_tasks().len(), 1);
    }

    #[test]
    fn test_complete_requires_active_focus() {
        let mut app = app_with_tasks(1);
        app.focus = Section::Completed;
        app.complete_selected();
        assert_eq!(app.store.active_tasks().len(), 1);
    }

    #[test]
    fn test_delete_from_completed_list() {
        let mut app = app_with_tasks(1);
        app.complete_selected();
        app.focus = Section::Completed;
        app.delete_selected();
        assert!(app.store.is_empty());
        assert_eq!(app.completed_state.selected(), None);
    }

    #[test]
    fn test_move_selection_stays_in_bounds() {
        let mut app = app_with_tasks(2);
        app.move_selection(false);
        assert_eq!(app.active_state.selected(), Some(0));
        app.move_selection(true);
        app.move_selection(true);
        app.move_selection(true);
        assert_eq!(app.active_state.selected(), Some(1));
    }

    #[test]
    fn test_form_submission_through_key_handler() {
        let mut app = App::new();
        app.enter_form();
        assert!(app.state == AppState::EditForm);
        assert!(app.store.is_open(Section::Form));

        for c in "Buy milk".chars() {
            app.handle_form_input(KeyCode::Char(c), KeyModifiers::NONE)
                .unwrap();
        }
        // Enter with no deadline set: silently suppressed, draft kept.
        app.handle_form_input(KeyCode::Enter, KeyModifiers::NONE)
            .unwrap();
        assert!(app.store.is_empty());
        assert_eq!(app.form.title.value, "Buy milk");

        app.handle_form_input(KeyCode::Tab, KeyModifiers::NONE)
            .unwrap();
        app.handle_form_input(KeyCode::Right, KeyModifiers::NONE)
            .unwrap(); // Medium
        app.handle_form_input(KeyCode::Tab, KeyModifiers::NONE)
            .unwrap();
        for c in "2025-06-01 09:00".chars() {
            app.handle_form_input(KeyCode::Char(c), KeyModifiers::NONE)
                .unwrap();
        }
        app.handle_form_input(KeyCode::Enter, KeyModifiers::NONE)
            .unwrap();

        let active = app.store.active_tasks();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Buy milk");
        assert_eq!(active[0].priority, Priority::Medium);
        // Form reset for the next entry.
        assert_eq!(app.form.title.value, "");
    }

    #[test]
    fn test_browse_keys_drive_sort_and_sections() {
        let mut app = app_with_tasks(1);

        app.handle_browse_input(KeyCode::Char('d'), KeyModifiers::NONE)
            .unwrap();
        assert_eq!(app.store.sort_order(), crate::fields::SortOrder::Desc);
        app.handle_browse_input(KeyCode::Char('p'), KeyModifiers::NONE)
            .unwrap();
        assert_eq!(app.store.sort_type(), SortType::Priority);
        assert_eq!(app.store.sort_order(), crate::fields::SortOrder::Asc);

        app.handle_browse_input(KeyCode::Char('2'), KeyModifiers::NONE)
            .unwrap();
        assert!(!app.store.is_open(Section::Active));

        let quit = app
            .handle_browse_input(KeyCode::Char('q'), KeyModifiers::NONE)
            .unwrap();
        assert!(quit);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = App::new();
        assert_eq!(app.focus, Section::Active);
        app.handle_browse_input(KeyCode::Tab, KeyModifiers::NONE)
            .unwrap();
        assert_eq!(app.focus, Section::Completed);
        app.handle_browse_input(KeyCode::Tab, KeyModifiers::NONE)
            .unwrap();
        assert_eq!(app.focus, Section::Form);
        app.handle_browse_input(KeyCode::BackTab, KeyModifiers::NONE)
            .unwrap();
        assert_eq!(app.focus, Section::Completed);
    }
}
