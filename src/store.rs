//! In-memory task store and derived views.
//!
//! This module provides the `TaskStore` struct that owns the canonical task
//! collection plus the process-wide UI state (sort key, sort direction,
//! section visibility), along with deadline parsing and formatting helpers.
//! Mutation happens only through the named entry points; readers get fresh
//! derived snapshots and never see the collection mid-change.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::fields::{Priority, Section, SortOrder, SortType};
use crate::task::Task;

/// Owner of the task collection and the global view state.
///
/// Operations never fail: completing or deleting an id that is not present
/// is a silent no-op. Completed tasks stay in insertion order; only the
/// active view is sorted.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    sort_type: SortType,
    sort_order: SortOrder,
    form_open: bool,
    active_open: bool,
    completed_open: bool,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
            sort_type: SortType::Date,
            sort_order: SortOrder::Asc,
            // The creation form starts collapsed, both lists start open.
            form_open: false,
            active_open: true,
            completed_open: true,
        }
    }
}

impl TaskStore {
    /// Create an empty store with the initial view state.
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Append a new incomplete task and return its id.
    ///
    /// Input is trusted here; the creation form enforces the non-empty
    /// title and set deadline preconditions before calling in.
    pub fn add_task(&mut self, title: String, priority: Priority, deadline: NaiveDateTime) -> u64 {
        let id = self.next_id;
        // The counter only ever increments, so ids stay unique even after
        // deletions.
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            title,
            priority,
            deadline,
            completed: false,
        });
        id
    }

    /// Mark the task with the given id as completed. No-op if absent.
    pub fn complete_task(&mut self, id: u64) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = true;
        }
    }

    /// Remove the task with the given id, active or completed. No-op if absent.
    pub fn delete_task(&mut self, id: u64) {
        self.tasks.retain(|t| t.id != id);
    }

    /// Apply a sort request from the sort controls.
    ///
    /// Requesting the key that is already active flips the direction;
    /// requesting the other key switches to it and resets to ascending.
    pub fn toggle_sort(&mut self, requested: SortType) {
        if self.sort_type == requested {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_type = requested;
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Currently active sort key.
    pub fn sort_type(&self) -> SortType {
        self.sort_type
    }

    /// Currently active sort direction.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Flip the open/closed flag for a screen section.
    pub fn toggle_section(&mut self, section: Section) {
        let flag = self.section_flag_mut(section);
        *flag = !*flag;
    }

    /// Force a screen section open.
    pub fn open_section(&mut self, section: Section) {
        *self.section_flag_mut(section) = true;
    }

    /// Whether a screen section is currently open.
    pub fn is_open(&self, section: Section) -> bool {
        match section {
            Section::Form => self.form_open,
            Section::Active => self.active_open,
            Section::Completed => self.completed_open,
        }
    }

    fn section_flag_mut(&mut self, section: Section) -> &mut bool {
        match section {
            Section::Form => &mut self.form_open,
            Section::Active => &mut self.active_open,
            Section::Completed => &mut self.completed_open,
        }
    }

    /// Whether the store holds no tasks at all.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Snapshot of the incomplete tasks, ordered by the current sort state.
    ///
    /// The underlying collection is left untouched. The sort is stable, so
    /// tasks that compare equal keep their relative insertion order in both
    /// directions; descending reverses the comparator's sign, not the list.
    pub fn active_tasks(&self) -> Vec<Task> {
        let mut active: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| !t.completed)
            .cloned()
            .collect();
        active.sort_by(|a, b| self.compare(a, b));
        active
    }

    /// Snapshot of the completed tasks in insertion order.
    pub fn completed_tasks(&self) -> Vec<Task> {
        self.tasks.iter().filter(|t| t.completed).cloned().collect()
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ord = match self.sort_type {
            SortType::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortType::Date => a.deadline.cmp(&b.deadline),
        };
        match self.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Parse deadline input from the creation form.
///
/// Accepts:
/// - "YYYY-MM-DD HH:MM"
/// - "YYYY-MM-DDTHH:MM" (datetime-local wire shape)
/// - "YYYY-MM-DD HH:MM:SS"
/// - "YYYY-MM-DD" (midnight)
///
/// Anything else counts as "deadline not set" and blocks submission.
pub fn parse_deadline_input(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Format a deadline for display in the task lists.
pub fn format_deadline(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}
