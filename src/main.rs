//! Dentistry API Server
//!
//! Appointment and consultation booking backend.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use dentistry_api::{
    api::start_server,
    core::{create_app_state, init_logging, Config},
};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("dentistry-api")
        .version(dentistry_api::VERSION)
        .about("Appointment and consultation booking API.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("HTTP listen port (overrides PORT)")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref()).context("loading configuration")?;

    // Apply CLI overrides
    apply_cli_overrides(&mut config, &matches)?;

    // Initialize logging
    init_logging(&config.logging).context("initializing logging")?;

    info!("Starting {} v{}", dentistry_api::NAME, dentistry_api::VERSION);

    // Store problems are logged and reported on /test, never fatal
    let state = create_app_state(config);

    start_server(state, shutdown_signal()).await.context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Apply command line argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(port) = matches.get_one::<String>("port") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid port: {}", port))?;
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.to_ascii_lowercase();
    }

    config.validate()?;
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
    warn!("Initiating graceful shutdown...");
}
