//! # Tasklist - Terminal Task List with Priority
//!
//! A single-screen task manager for the terminal: add tasks with a title,
//! priority and deadline, complete or delete them, and sort the active list
//! by date or priority.
//!
//! ## Key Features
//!
//! - **One Screen**: creation form, active tasks and completed tasks as
//!   collapsible sections on a single page
//! - **Sortable Active List**: by deadline or by priority, in either
//!   direction; completed tasks stay in the order they were finished
//! - **Keyboard Only**: every action is a single key, no mouse required
//! - **Ephemeral by Design**: no files, no network, no configuration; the
//!   list lives and dies with the process
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI
//! tasklist
//!
//! # Then: 'a' to add a task, 'd'/'p' to sort, 'c' to complete,
//! # 'x' to delete, 'h' for the full key map, 'q' to quit.
//! ```

use clap::Parser;

pub mod cli;
pub mod fields;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;

fn main() {
    // No flags beyond --help/--version; parsing still gives both for free.
    let _cli = Cli::parse();

    if let Err(e) = tui::run::run_tui() {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}
