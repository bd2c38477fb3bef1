//! Headless API server entrypoint.

use snipstash_core::db::backup::BackupManager;
use snipstash_core::DEFAULT_PORT;
use snipstash_server::config::{env_flag_enabled, Config};
use snipstash_server::{db::Database, resolve_bind_address, serve_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
    backup: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            "--backup" => flags.backup = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "snipstash=info,snipstash_server=info,snipstash_core=info,tower_http=warn".into()
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let flags = parse_cli_flags(&args)?;
    if flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    if flags.backup {
        return run_backup(&config);
    }
    serve(config).await
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.auto_backup {
        if let Err(err) = BackupManager::new(&config.db_path).create_backup() {
            tracing::warn!("Auto-backup skipped: {}", err);
        }
    }

    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("ALLOW_PUBLIC_ACCESS set: accepting cross-origin requests from any origin");
    }
    if let Some(dir) = config.static_dir.as_deref() {
        tracing::info!("Serving static UI from {}", dir);
    }

    let bind_addr = resolve_bind_address(&config, allow_public);
    let database = Database::new(&config.db_path)?;
    let environment = config.environment.clone();
    let state = AppState::new(config, database);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!(%environment, "SnipStash listening on http://{}", local_addr);

    serve_router(listener, state, allow_public, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn print_help() {
    println!("SnipStash Server\n");
    println!("Usage: snipstash [OPTIONS]\n");
    println!("Options:");
    println!("  --backup          Copy the database directory and exit");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH           Database directory (default: ~/.cache/snipstash/db)");
    println!("  PORT              Server port (default: {})", DEFAULT_PORT);
    println!("  MAX_BODY_SIZE     Maximum request body in bytes (default: 1MB)");
    println!("  SNIPSTASH_ENV     Environment label reported by /api/health");
    println!("  STATIC_DIR        Serve a single-page UI from this directory");
    println!("  AUTO_BACKUP       Back up the database on startup");
    println!("  ALLOW_PUBLIC_ACCESS  Allow CORS from any origin");
    println!(
        "  BIND              Override bind address (e.g. 0.0.0.0:{})",
        DEFAULT_PORT
    );
}

fn run_backup(config: &Config) -> anyhow::Result<()> {
    match BackupManager::new(&config.db_path).create_backup()? {
        Some(path) => println!("Database backed up to: {}", path.display()),
        None => println!("No existing database to backup"),
    }
    Ok(())
}

async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Ctrl+C handler unavailable: {}", err);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            tracing::error!("SIGTERM handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_terminate() {
    std::future::pending::<()>().await;
}

async fn shutdown_signal() {
    tokio::select! {
        _ = wait_for_ctrl_c() => {},
        _ = wait_for_terminate() => {},
    }
    tracing::info!("Shutdown signal received, draining connections");
}
