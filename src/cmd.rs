//! Command implementations for the CLI interface.
//!
//! `ui` runs the interactive board. `users` and `board` print the demo
//! directory and the starting board so they can be checked without a
//! terminal UI.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::app::AppState;
use crate::config::Config;
use crate::fields::{format_column, format_priority, format_role, Role};
use crate::route::Route;
use crate::tui::run::run_tui;
use crate::tui::utils::truncate;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive board (the default).
    Ui {
        /// Sign in on start with this email.
        #[arg(long, requires = "password")]
        email: Option<String>,
        /// Password for --email.
        #[arg(long)]
        password: Option<String>,
        /// Open this route after signing in, e.g. `/chat` or `/task/new?column=doing`.
        #[arg(long)]
        route: Option<String>,
    },

    /// List the demo accounts.
    Users {
        /// Only show accounts with this role.
        #[arg(long, value_enum)]
        role: Option<Role>,
    },

    /// Print the starting board.
    Board,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the interactive UI, optionally signed in and on a given route.
pub fn cmd_ui(config: Config, email: Option<String>, password: Option<String>, route: Option<String>) {
    let mut state = AppState::new(config);

    if let (Some(email), Some(password)) = (email.as_deref(), password.as_deref()) {
        if let Err(e) = state.login(email, password) {
            eprintln!("Sign in failed for {}: {}", email, e);
            std::process::exit(1);
        }
    }
    if let Some(raw) = route.as_deref() {
        state.navigate(Route::parse(raw));
    }

    if let Err(e) = run_tui(state) {
        tracing::error!(error = %e, "terminal UI failed");
        eprintln!("Error running UI: {}", e);
        std::process::exit(1);
    }
}

pub fn cmd_users(config: &Config, role: Option<Role>) {
    let state = AppState::new(config.clone());
    let users: Vec<_> = state
        .directory
        .all_users()
        .iter()
        .filter(|u| role.map_or(true, |r| u.role == r))
        .collect();
    if users.is_empty() {
        println!("No users.");
        return;
    }
    println!("{:<4} {:<16} {:<24} {:<8} {}", "ID", "Name", "Email", "Role", "Member since");
    for u in users {
        println!(
            "{:<4} {:<16} {:<24} {:<8} {}",
            u.id,
            truncate(&u.name, 16),
            truncate(&u.email, 24),
            format_role(u.role),
            u.created_at.format("%Y-%m-%d")
        );
    }
}

pub fn cmd_board(config: &Config) {
    let state = AppState::new(config.clone());
    for column in state.board.columns() {
        println!("{} ({})", format_column(column.id), column.tasks.len());
        for task in &column.tasks {
            let assignee = task.assignee.as_deref().unwrap_or("-");
            println!(
                "  {:<4} {:<32} {:<8} {}",
                task.id,
                truncate(&task.title, 32),
                format_priority(task.priority),
                assignee
            );
        }
    }
}

/// Print completion scripts for the binary.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
