//! Task data structure.
//!
//! This module defines the core `Task` struct representing a single item on
//! the list, with its priority, deadline and completion flag.

use chrono::NaiveDateTime;

use crate::fields::Priority;

/// A single item on the task list.
///
/// Tasks are created through [`crate::store::TaskStore::add_task`], which
/// assigns the unique `id` and starts them out incomplete. Completion is a
/// one-way transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub priority: Priority,
    pub deadline: NaiveDateTime,
    pub completed: bool,
}
