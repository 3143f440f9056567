use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tavla")]
#[command(about = "A kanban board with dense task ordering", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Path to the board database (or set TAVLA_DB env var)
    #[arg(value_name = "DB", env = "TAVLA_DB")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show all columns with their tasks, in board order
    Show,
}

#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Create a column at the end of the board
    Create {
        #[arg(long)]
        name: String,
    },
    /// List all columns
    List,
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task at the tail of a column
    Create {
        #[arg(long)]
        column_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Get a specific task
    Get { id: i64 },
    /// Update a task's title and/or description
    Update(TaskUpdateArgs),
    /// Move a task to a column and index (index is clamped)
    Move {
        id: i64,
        #[arg(long)]
        column_id: i64,
        #[arg(long, allow_hyphen_values = true)]
        index: i64,
    },
    /// Delete a task
    Delete { id: i64 },
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
}
