//! postsync CLI
//!
//! Command-line and terminal client for a remote post collection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use postsync_core::{Config, HttpGateway, PostId, SyncController};

mod commands;
mod editor;
mod form;
mod logging;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "postsync")]
#[command(about = "postsync - Browse and edit a remote post collection")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List the current posts
    #[command(alias = "ls")]
    List,
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Post title
        #[arg(short = 'T', long)]
        title: String,
        /// Post body (opens editor if not provided)
        #[arg(short, long)]
        body: Option<String>,
        /// Author id (defaults to default_user_id)
        #[arg(short, long)]
        user_id: Option<u64>,
    },
    /// Update a post
    #[command(alias = "edit")]
    Update {
        /// Post id
        id: PostId,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New body (opens editor if neither field is given)
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post id
        id: PostId,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, list_limit, default_user_id, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that only touch the config file
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        return tui::run(config).await;
    };
    if matches!(command, Commands::Tui) {
        return tui::run(config).await;
    }

    logging::init_cli_logging();

    let mut controller =
        SyncController::from_config(HttpGateway::new(&config.api_url), &config);

    handle_post_command(command, &mut controller, &output).await
}

async fn handle_post_command(
    command: Commands,
    controller: &mut SyncController<HttpGateway>,
    output: &Output,
) -> Result<()> {
    match command {
        Commands::List => commands::post::list(controller, output).await,
        Commands::Create {
            title,
            body,
            user_id,
        } => commands::post::create(controller, title, body, user_id, output).await,
        Commands::Update { id, title, body } => {
            commands::post::update(controller, id, title, body, output).await
        }
        Commands::Delete { id } => commands::post::delete(controller, id, output).await,
        Commands::Tui => unreachable!(),           // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
