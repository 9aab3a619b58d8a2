//! Enumerations and field types for the task list.
//!
//! This module defines the structured values attached to tasks (priority)
//! and the process-wide UI state values (sort key, sort direction, and the
//! collapsible screen sections).

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank. Lower rank sorts first in ascending order, so the
    /// ascending priority view reads High, Medium, Low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Available sorting keys for the active task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortType {
    Date,
    Priority,
}

impl SortType {
    /// Human-readable label for the sort controls.
    pub fn label(self) -> &'static str {
        match self {
            SortType::Date => "date",
            SortType::Priority => "priority",
        }
    }
}

/// Direction applied to the current sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Arrow glyph shown next to the active sort key.
    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "^",
            SortOrder::Desc => "v",
        }
    }
}

/// Collapsible screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Form,
    Active,
    Completed,
}

impl Section {
    /// Section title shown in the region header.
    pub fn title(self) -> &'static str {
        match self {
            Section::Form => "New Task",
            Section::Active => "Tasks",
            Section::Completed => "Completed Tasks",
        }
    }

    /// The section below this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Section::Form => Section::Active,
            Section::Active => Section::Completed,
            Section::Completed => Section::Form,
        }
    }

    /// The section above this one, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Section::Form => Section::Completed,
            Section::Active => Section::Form,
            Section::Completed => Section::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_orders_high_first() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_sort_order_toggled() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
    }

    #[test]
    fn test_section_cycle_is_closed() {
        for s in [Section::Form, Section::Active, Section::Completed] {
            assert_eq!(s.next().prev(), s);
        }
    }
}
