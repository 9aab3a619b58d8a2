//! Task creation form for the terminal user interface.
//!
//! This module provides the `TaskForm` structure holding the draft title,
//! priority and deadline, with field navigation and submit validation.

use chrono::NaiveDateTime;

use crate::fields::Priority;
use crate::store::parse_deadline_input;
use crate::tui::input::InputField;

/// Field positions in visual order.
pub const TITLE_FIELD: usize = 0;
pub const PRIORITY_FIELD: usize = 1;
pub const DEADLINE_FIELD: usize = 2;

/// Draft state for a task being created.
///
/// The draft survives failed submissions untouched; a successful submission
/// resets every field to its default.
pub struct TaskForm {
    pub title: InputField,
    pub deadline: InputField,
    pub priority: usize,
    pub priorities: Vec<Priority>,
    pub current_field: usize,
}

impl TaskForm {
    /// Create a fresh form: empty title, Low priority, empty deadline.
    pub fn new() -> Self {
        let mut form = TaskForm {
            title: InputField::new(),
            deadline: InputField::new(),
            priority: 0, // Low
            priorities: vec![Priority::Low, Priority::Medium, Priority::High],
            current_field: TITLE_FIELD,
        };
        form.update_active_field();
        form
    }

    /// Total number of fields including the priority selector.
    pub fn field_count(&self) -> usize {
        3
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.deadline.active = self.current_field == DEADLINE_FIELD;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TITLE_FIELD => self.title.handle_char(c),
            DEADLINE_FIELD => self.deadline.handle_char(c),
            _ => {}
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TITLE_FIELD => self.title.handle_backspace(),
            DEADLINE_FIELD => self.deadline.handle_backspace(),
            _ => {}
        }
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        match self.current_field {
            TITLE_FIELD => self.title.handle_delete(),
            DEADLINE_FIELD => self.deadline.handle_delete(),
            _ => {}
        }
    }

    /// Handle left/right arrow keys for cursor movement or the priority selector.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            TITLE_FIELD => {
                if right {
                    self.title.move_cursor_right()
                } else {
                    self.title.move_cursor_left()
                }
            }
            DEADLINE_FIELD => {
                if right {
                    self.deadline.move_cursor_right()
                } else {
                    self.deadline.move_cursor_left()
                }
            }
            PRIORITY_FIELD => {
                if right {
                    self.priority = (self.priority + 1) % self.priorities.len();
                } else {
                    self.priority = if self.priority == 0 {
                        self.priorities.len() - 1
                    } else {
                        self.priority - 1
                    };
                }
            }
            _ => {}
        }
    }

    /// The priority currently shown by the selector.
    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// Validate and take the draft for submission.
    ///
    /// Returns the draft values and resets the form when the trimmed title
    /// is non-empty and the deadline parses; otherwise returns `None` and
    /// leaves the draft in place for correction.
    pub fn take_submission(&mut self) -> Option<(String, Priority, NaiveDateTime)> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return None;
        }
        let deadline = parse_deadline_input(&self.deadline.value)?;
        let submission = (title.to_string(), self.selected_priority(), deadline);
        self.reset();
        Some(submission)
    }

    /// Reset every field to its default and focus the title.
    pub fn reset(&mut self) {
        self.title.clear();
        self.deadline.clear();
        self.priority = 0;
        self.current_field = TITLE_FIELD;
        self.update_active_field();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn test_defaults() {
        let form = TaskForm::new();
        assert_eq!(form.title.value, "");
        assert_eq!(form.deadline.value, "");
        assert_eq!(form.selected_priority(), Priority::Low);
        assert_eq!(form.current_field, TITLE_FIELD);
        assert!(form.title.active);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = TaskForm::new();
        form.next_field();
        assert_eq!(form.current_field, PRIORITY_FIELD);
        form.next_field();
        assert_eq!(form.current_field, DEADLINE_FIELD);
        assert!(form.deadline.active);
        form.next_field();
        assert_eq!(form.current_field, TITLE_FIELD);
        form.prev_field();
        assert_eq!(form.current_field, DEADLINE_FIELD);
    }

    #[test]
    fn test_priority_selector_cycles() {
        let mut form = TaskForm::new();
        form.next_field(); // priority
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::Medium);
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::High);
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::Low);
        form.handle_left_right(false);
        assert_eq!(form.selected_priority(), Priority::High);
    }

    #[test]
    fn test_submit_requires_title_and_deadline() {
        let mut form = TaskForm::new();
        assert!(form.take_submission().is_none());

        type_into(&mut form, "   ");
        assert!(form.take_submission().is_none());

        form.reset();
        type_into(&mut form, "Buy milk");
        // Deadline still empty.
        assert!(form.take_submission().is_none());
        // Draft preserved after the failed submission.
        assert_eq!(form.title.value, "Buy milk");

        form.next_field();
        form.next_field();
        type_into(&mut form, "not a date");
        assert!(form.take_submission().is_none());
        assert_eq!(form.deadline.value, "not a date");
    }

    #[test]
    fn test_submit_trims_title_and_resets() {
        let mut form = TaskForm::new();
        type_into(&mut form, "  Buy milk  ");
        form.next_field();
        form.handle_left_right(true); // Medium
        form.next_field();
        type_into(&mut form, "2025-06-01 09:00");

        let (title, priority, deadline) = form.take_submission().unwrap();
        assert_eq!(title, "Buy milk");
        assert_eq!(priority, Priority::Medium);
        assert_eq!(deadline.to_string(), "2025-06-01 09:00:00");

        assert_eq!(form.title.value, "");
        assert_eq!(form.deadline.value, "");
        assert_eq!(form.selected_priority(), Priority::Low);
        assert_eq!(form.current_field, TITLE_FIELD);
    }
}
