//! Shopbot HTTP API entry point.
//!
//! Binary name: `shopbot`
//!
//! Parses CLI arguments, initializes the database and services, then either
//! starts the API server (with the background expiry sweeper) or runs a
//! one-shot maintenance command.

mod http;
mod state;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use shopbot_core::conversation::sweeper::ExpirySweeper;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Parser)]
#[command(name = "shopbot", version, about = "Shopbot e-commerce backend")]
struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind port (overrides config.toml)
        #[arg(long, env = "SHOPBOT_PORT")]
        port: Option<u16>,

        /// Bind host (overrides config.toml)
        #[arg(long, env = "SHOPBOT_HOST")]
        host: Option<String>,
    },

    /// Delete conversations older than the given number of days
    Cleanup {
        #[arg(long, default_value_t = 1)]
        days: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,shopbot=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Initialize application state (DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.host.clone());
            let port = port.unwrap_or(state.config.port);

            // Background expiry sweep, decoupled from request handling.
            let sweeper = Arc::new(ExpirySweeper::new(
                state.conversation_service.clone(),
                Duration::from_secs(state.config.sweep_interval_secs),
                state.config.conversation_retention_days,
            ));
            let sweeper_handle = sweeper.spawn();

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Shopbot API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            sweeper_handle.abort();
            println!("\n  Server stopped.");
        }

        Commands::Cleanup { days } => {
            let deleted = state
                .conversation_service
                .expire_older_than(Some(days))
                .await?;
            println!(
                "  {} Deleted {} conversation(s) older than {} day(s)",
                console::style("🗑").bold(),
                console::style(deleted).yellow(),
                days
            );
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
