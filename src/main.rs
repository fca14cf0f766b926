//! DisLogger - supervised monitors with configurable log delivery
//!
//! Main entry point for the DisLogger CLI.

mod adapters;
mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dislogger_config::{ConfigDocument, ConfigLoader};
use dislogger_core::{
    ChatReporter, ConfigResolver, CoreError, LogReporter, StatusReporter, Supervisor,
};

use crate::adapters::DiscordNotifier;
use crate::cli::{Cli, Commands};

/// Initialize tracing with console output and, when `log_dir` is given,
/// daily rotated log files.
fn init_tracing(log_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("dislogger")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop; keep it for the whole process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() {
    let Cli {
        config,
        log_dir,
        token,
        command,
    } = Cli::parse();

    if let Err(e) = init_tracing(log_dir.as_deref()) {
        eprintln!("Could not initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config, token).await,
        Commands::Check => check(&config, token).await,
    };

    if let Err(e) = result {
        fatal(&config, e);
    }
}

/// Exit status of a run that ended with an error.
const EXIT_FAILURE: i32 = 1;

/// Print a diagnostic and end the process.
fn fatal(config: &Path, err: CoreError) -> ! {
    let message = diagnostic(config, &err);
    error!("{}", message);
    eprintln!("{}", message);
    std::process::exit(exit_code(&err));
}

fn diagnostic(config: &Path, err: &CoreError) -> String {
    if err.is_config() {
        format!("Configuration error in {}: {}", config.display(), err)
    } else {
        format!("Error: {}", err)
    }
}

fn exit_code(_err: &CoreError) -> i32 {
    EXIT_FAILURE
}

/// The loaded document plus the collaborators built from its `server` section.
struct Setup {
    resolver: ConfigResolver,
    reporter: Box<dyn StatusReporter>,
}

fn setup(path: &Path, token: Option<String>) -> Result<Setup, CoreError> {
    let document: ConfigDocument = ConfigLoader::initiate(path)?;
    let server = document.server()?;

    let token = token
        .or(server.bot_token)
        .filter(|t| !t.trim().is_empty());
    let notifier = token
        .map(DiscordNotifier::new)
        .transpose()?
        .map(Arc::new);

    let mut resolver = ConfigResolver::new(document);
    let reporter: Box<dyn StatusReporter> = match &notifier {
        Some(notifier) => {
            resolver = resolver.with_chat_notifier(notifier.clone());
            match server.main_channel_id.filter(|c| !c.is_empty()) {
                Some(channel) => Box::new(ChatReporter::new(notifier.clone(), channel)),
                None => Box::new(LogReporter),
            }
        }
        None => {
            warn!("No Discord bot token configured, DiscordHandler entries cannot be built");
            Box::new(LogReporter)
        }
    };

    Ok(Setup { resolver, reporter })
}

/// Start every monitor and run until Ctrl-C.
async fn run(path: &Path, token: Option<String>) -> Result<(), CoreError> {
    let Setup { resolver, reporter } = setup(path, token)?;
    let supervisor = Supervisor::new(Arc::new(resolver));

    supervisor.start_logging(reporter.as_ref()).await?;
    info!("Monitoring, press Ctrl-C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
    }
    info!("Shutdown requested");

    supervisor.stop_logging(reporter.as_ref()).await?;
    Ok(())
}

/// Resolve every monitor without starting any.
async fn check(path: &Path, token: Option<String>) -> Result<(), CoreError> {
    let Setup { resolver, .. } = setup(path, token)?;
    let monitors = resolver.get_monitors()?;

    println!("Config {} is valid.", path.display());
    println!("{:<24} {:<16} {}", "MONITOR", "LOGGER", "HANDLERS");
    for monitor in &monitors {
        println!(
            "{:<24} {:<16} {}",
            monitor.name(),
            monitor.logger().name(),
            monitor.logger().handler_names().join(", ")
        );
    }
    Ok(())
}
