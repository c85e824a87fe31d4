//! Reservas Ortiz: CLI Server
//!
//! Headless reservation manager suitable for running as a systemd service,
//! Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/reservas/config.toml)
//! reservas
//!
//! # Custom config path
//! reservas --config /etc/reservas/config.toml
//!
//! # Override port and mirror every change to disk
//! reservas --port 8080 --persist
//!
//! # Validate config without starting
//! reservas --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use reservas::config::AppConfig;
use reservas::server::{init_tracing, ServerHandle, ServerOptions};

/// Reservas Ortiz: in-memory reservation manager.
#[derive(Parser, Debug)]
#[command(
    name = "reservas",
    version,
    about = "Reservation manager with optional JSON snapshot persistence",
    long_about = "Reservas Ortiz: HTTP server for creating, listing, editing and \
                  cancelling reservations.\n\n\
                  Default config: ~/.config/reservas/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "RESERVAS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the snapshot file location.
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Save the snapshot file after every successful change.
    #[arg(long)]
    persist: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(reservas::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(path) = cli.data_file {
        config.storage.data_file = path;
    }
    if cli.persist {
        config.storage.persist_on_mutation = true;
    }

    init_tracing(&config);

    let config_ok = load_error.is_none();
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if !config_ok {
            return Err(format!("invalid configuration file {}", config_path.display()).into());
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Data file   : {}", config.storage.data_file.display());
        println!("   Load on boot: {}", config.storage.load_on_startup);
        println!("   Persist     : {}", config.storage.persist_on_mutation);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions { config }).await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
