//! Poolside CLI and REST API entry point.
//!
//! Binary name: `poolside`
//!
//! Checks the message registry, loads configuration, initializes tracing,
//! database and services, then dispatches to a command or starts the server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use poolside_infra::config::{load_config, resolve_data_dir};
use poolside_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "poolside", &mut std::io::stdout());
        return Ok(());
    }

    // Every category must resolve before anything can respond with one
    poolside_core::message::validate().context("message registry is inconsistent")?;

    let data_dir = resolve_data_dir();
    let config = load_config(&data_dir).await;

    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(cli.log_directive(), config.logging.format, otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, config, data_dir).await;
    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    config: poolside_types::config::PoolsideConfig,
    data_dir: std::path::PathBuf,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Messages { check } => {
            if check {
                cli::messages::check_messages(cli.json)?;
            } else {
                cli::messages::list_messages(cli.json)?;
            }
        }

        Commands::CreateAdmin {
            email,
            name,
            phone,
            role,
            password,
        } => {
            let state = AppState::from_config(config, data_dir).await?;
            cli::admin::create_admin(&state, email, name, phone, role, password, cli.json).await?;
        }

        Commands::Serve { port, host, .. } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::from_config(config, data_dir).await?;
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            tracing::info!(%addr, "server listening");
            if !cli.quiet {
                println!(
                    "  {} Poolside API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
