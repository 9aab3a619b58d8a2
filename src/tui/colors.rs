//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Priority tags are color-coded in both task lists.

/// Used for High priority.
pub const HIGH_RED: Color = Color::Rgb(200, 40, 40);
/// Used for Medium priority.
pub const MEDIUM_GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for Low priority.
pub const LOW_GREEN: Color = Color::Rgb(0, 130, 60);
