//! CLI definitions for DisLogger.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use dislogger_config::DEFAULT_CONFIG_PATH;

/// DisLogger CLI.
#[derive(Parser)]
#[command(name = "dislogger")]
#[command(about = "Supervised liveness and resource monitors with configurable log delivery")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Also write process logs to daily files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Discord bot token, overrides `server.bot_token`
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Start every configured monitor and run until Ctrl-C (default)
    Run,

    /// Load the config and build every monitor without starting them
    Check,
}
