mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::{resolve_config, CliContext};
use taskboard_core::TaskboardError;
use taskboard_domain::DashboardOptions;
use taskboard_remote::{Backend, ClientStateStore};
use taskboard_tui::App;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_env_filter(
                EnvFilter::try_from_env("TASKBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_env("TASKBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    match cli.command {
        None => {
            let backend = Backend::from_config(&config).await?;
            let store = ClientStateStore::new(config.effective_state_file());
            let state = store.load_or_default().await;
            let mut app = App::new(backend, store, state, DashboardOptions::from_config(&config));
            app.run().await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        }
        Some(cmd) => {
            if let Err(e) = run_command(config, cmd).await {
                output::output_error(&error_message(&e));
            }
        }
    }

    Ok(())
}

async fn run_command(config: taskboard_core::AppConfig, cmd: Commands) -> anyhow::Result<()> {
    // Language is client state only; no backend needed.
    let cmd = match cmd {
        Commands::Lang(lang_cmd) => {
            let store = ClientStateStore::new(config.effective_state_file());
            return handlers::lang::handle(&store, lang_cmd.action).await;
        }
        other => other,
    };

    let mut ctx = CliContext::load(config).await?;
    match cmd {
        Commands::Signup {
            full_name,
            email,
            password,
        } => handlers::auth::signup(&mut ctx, full_name, email, password).await,
        Commands::Login { email, password } => handlers::auth::login(&mut ctx, email, password).await,
        Commands::Logout => handlers::auth::logout(&mut ctx).await,
        Commands::Whoami => handlers::auth::whoami(&mut ctx).await,
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action).await,
        Commands::Lang(_) | Commands::Completions { .. } => Ok(()),
    }
}

fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<TaskboardError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}
