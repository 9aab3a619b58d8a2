use clap::Parser;

/// Single-screen task list in the terminal.
/// All state is in memory and lost on exit.
#[derive(Parser)]
#[command(
    name = "tasklist",
    version,
    about = "Terminal task list with priorities and deadlines"
)]
pub struct Cli {}
