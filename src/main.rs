//! # TaskBoard - terminal kanban board
//!
//! A three-column kanban board (To Do, Doing, Done) for the terminal, with a
//! separate task editor, a team chat room, shared boards with join codes and
//! a settings page.
//!
//! ## Key Features
//!
//! - **Board**: cards grouped by column, keyboard moves and mouse swipes
//! - **Task editor**: create, edit and delete tasks; results are handed back
//!   to the board through the session store and applied once
//! - **Compact layout**: narrow terminals show one column at a time
//! - **Demo accounts**: `joao@example.com` and `maria@example.com`, password `123456`
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board
//! tb
//!
//! # Sign in up front and open the chat
//! tb ui --email joao@example.com --password 123456 --route /chat
//!
//! # Print the starting board
//! tb board
//! ```
//!
//! Nothing is persisted: every launch starts anonymous with the sample board.
//! Settings are read from `~/.config/taskboard/config.toml` if it exists.

use clap::Parser;

pub mod app;
pub mod auth;
pub mod board;
pub mod boards;
pub mod channel;
pub mod chat;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod editor;
pub mod fields;
pub mod logging;
pub mod notice;
pub mod route;
pub mod session;
pub mod settings;
pub mod swipe;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod board_view;
    pub mod boards_view;
    pub mod chat_view;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod login_view;
    pub mod run;
    pub mod settings_view;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = logging::init_logging(&config.log_level, config.log_file.as_deref());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "taskboard starting");

    match cli.command {
        None => cmd_ui(config, None, None, None),
        Some(Commands::Ui { email, password, route }) => cmd_ui(config, email, password, route),
        Some(Commands::Users { role }) => cmd_users(&config, role),
        Some(Commands::Board) => cmd_board(&config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }
}
