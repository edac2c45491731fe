//! Warden CLI - Agent interception layer.
//!
//! Runs the Warden handlers outside an agent host: inspect which topics a
//! prompt would trigger, put a single command through the confirmation
//! gate, serve a host over JSON lines, or render the status footer.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use warden_runtime::config_bridge;
use warden_telemetry::{LogConfig, LogFormat, setup_logging};

mod commands;
mod stdio;
mod terminal;
mod theme;

use commands::{check, config, detect, serve, status};

/// Warden - Agent interception layer
#[derive(Parser)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which topics a text would trigger
    Detect {
        /// Prompt text or tool path to scan
        text: String,
    },

    /// Run the confirmation gate against a shell command
    Check {
        /// The command line to evaluate
        command: String,

        /// Never prompt; risky commands are denied
        #[arg(long)]
        no_input: bool,
    },

    /// Read host events as JSON lines on stdin and answer on stdout
    Serve,

    /// Render the status footer for the current directory
    Status {
        /// Footer width in columns
        #[arg(short, long, env = "COLUMNS", default_value = "80")]
        width: usize,

        /// Active model id
        #[arg(long)]
        model: Option<String>,

        /// Context window of the model, in tokens
        #[arg(long, default_value = "0")]
        context_window: u64,

        /// Thinking level shown in the footer
        #[arg(long, default_value = "off")]
        thinking: String,

        /// JSON file with an array of per-message usage entries
        #[arg(long)]
        usage: Option<PathBuf>,
    },

    /// View and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration as TOML
    Show,
    /// Validate the current configuration
    Validate,
    /// Show config file paths being checked
    Paths,
}

fn init_logging(verbose: bool) {
    let workspace_root = std::env::current_dir().ok();
    let from_config = warden_config::Config::load(workspace_root.as_deref())
        .ok()
        .and_then(|r| config_bridge::to_log_config(&r.config).ok());

    let log_config = if let Some(mut lc) = from_config {
        if verbose {
            "debug".clone_into(&mut lc.level);
        }
        lc
    } else {
        let level = if verbose { "debug" } else { "warn" };
        LogConfig::new(level).with_format(LogFormat::Compact)
    };
    if let Err(e) = setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Detect { text } => detect::run_detect(&text)?,
        Commands::Check { command, no_input } => {
            let outcome = check::run_check(&command, no_input).await?;
            // A timed-out prompt leaves its thread blocked on the terminal.
            std::process::exit(if outcome.is_allowed() { 0 } else { 1 });
        },
        Commands::Serve => serve::run_serve().await?,
        Commands::Status {
            width,
            model,
            context_window,
            thinking,
            usage,
        } => {
            status::run_status(status::StatusArgs {
                width,
                model,
                context_window,
                thinking,
                usage,
            })
            .await?;
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => config::show_config()?,
            ConfigCommands::Validate => {
                if !config::validate_config()? {
                    std::process::exit(1);
                }
            },
            ConfigCommands::Paths => config::show_paths()?,
        },
    }

    Ok(())
}
