use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_core::BackendKind;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A terminal task board backed by Supabase", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend to talk to: supabase or local
    #[arg(long, global = true, env = "TASKBOARD_BACKEND")]
    pub backend: Option<BackendKind>,

    /// Data file for the local backend
    #[arg(long, global = true, env = "TASKBOARD_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Where the language and session are stored
    #[arg(long, global = true, env = "TASKBOARD_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    #[arg(long, global = true, env = "TASKBOARD_SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// Project anon key
    #[arg(long, global = true, env = "TASKBOARD_SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new account
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Task operations
    Task(TaskCommand),
    /// Interface language
    Lang(LangCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, newest first
    List(TaskListArgs),
    /// Get a specific task
    Get {
        #[arg(long)]
        id: String,
    },
    /// Create a new task in todo
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        notes: String,
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// Edit title, notes or priority
    Edit(TaskEditArgs),
    /// Change status once the server confirms
    Status {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },
    /// Move to a status, applied locally first
    Move {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct TaskListArgs {
    /// all, todo, in-progress or completed
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive match on title or notes
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Creation date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct TaskEditArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
}

// Language commands
#[derive(Args)]
pub struct LangCommand {
    #[command(subcommand)]
    pub action: LangAction,
}

#[derive(Subcommand)]
pub enum LangAction {
    /// Show the current language
    Get,
    /// Switch language (en or hi)
    Set { code: String },
}
