//! Command-line interface of the `libris` binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};

use libris_core::config::CliOverrides;
use libris_core::constants::LIBRIS_VERSION;
use libris_core::errors::LibrisError;
use libris_core::traits::ISessionStorage;
use libris_core::LibrisConfig;
use libris_storage::{SeedPlan, StorageEngine};

use crate::state::AppState;
use crate::{auth, build_router};

#[derive(Parser, Debug)]
#[command(name = "libris", version = LIBRIS_VERSION, about = "Web catalog of books and reviews with fuzzy title search")]
pub struct Cli {
    /// TOML config file (defaults to ./libris.toml when present)
    #[arg(long, global = true, env = "LIBRIS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve {
        /// Socket address to listen on
        #[arg(long)]
        bind: Option<String>,
        /// SQLite database file
        #[arg(long)]
        db: Option<String>,
    },
    /// Create or migrate the database, then exit
    InitDb {
        #[arg(long)]
        db: Option<String>,
    },
    /// Fill the database with synthetic users, books and reviews
    Seed {
        #[arg(long)]
        db: Option<String>,
        #[arg(long, default_value_t = 1000)]
        users: u64,
        #[arg(long, default_value_t = 1_000_000)]
        books: u64,
        /// Password shared by every seeded user
        #[arg(long, default_value = "password")]
        password: String,
    },
}

impl Command {
    fn overrides(&self) -> CliOverrides {
        match self {
            Self::Serve { bind, db } => CliOverrides {
                bind_addr: bind.clone(),
                db_path: db.clone(),
            },
            Self::InitDb { db } | Self::Seed { db, .. } => CliOverrides {
                bind_addr: None,
                db_path: db.clone(),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Libris(#[from] LibrisError),

    #[error("invalid bind address {addr:?}: {source}")]
    BindAddr {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve configuration and dispatch the subcommand.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = cli.command.overrides();
    let config =
        LibrisConfig::load(cli.config.as_deref(), Some(&overrides)).map_err(LibrisError::from)?;

    match cli.command {
        Command::Serve { .. } => serve(config),
        Command::InitDb { .. } => init_db(&config),
        Command::Seed {
            users,
            books,
            password,
            ..
        } => seed(&config, users, books, &password),
    }
}

fn open_storage(config: &LibrisConfig) -> Result<StorageEngine, CliError> {
    let path = Path::new(config.storage.effective_db_path());
    let engine = StorageEngine::open_with(path, &config.storage)?;
    let schema_version = engine.schema_version()?;
    tracing::info!(path = %path.display(), schema_version, "database opened");
    Ok(engine)
}

fn init_db(config: &LibrisConfig) -> Result<(), CliError> {
    open_storage(config)?;
    Ok(())
}

fn seed(config: &LibrisConfig, users: u64, books: u64, password: &str) -> Result<(), CliError> {
    let engine = open_storage(config)?;
    let password_hash = auth::hash_password(password).map_err(LibrisError::from)?;
    let plan = SeedPlan {
        users,
        books,
        password_hash,
    };
    let report = engine.seed(&plan, &mut rand::rng())?;
    println!(
        "seeded {} users, {} books, {} reviews",
        report.users, report.books, report.reviews
    );
    Ok(())
}

/// Open storage synchronously, then run the server on a fresh runtime.
fn serve(config: LibrisConfig) -> Result<(), CliError> {
    let bind = config.server.effective_bind_addr().to_string();
    let addr: SocketAddr = bind.parse().map_err(|source| CliError::BindAddr {
        addr: bind.clone(),
        source,
    })?;

    let engine = open_storage(&config)?;
    let purged = engine.purge_expired_sessions(Utc::now())?;
    if purged > 0 {
        tracing::info!(purged, "removed expired sessions");
    }

    let state = AppState::new(engine, config);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %addr, version = LIBRIS_VERSION, "listening");
        axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("server stopped");
        Ok::<(), CliError>(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "libris", "serve", "--bind", "0.0.0.0:8080", "--db", "/tmp/catalog.db",
        ])
        .unwrap();
        let overrides = cli.command.overrides();
        assert_eq!(overrides.bind_addr.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(overrides.db_path.as_deref(), Some("/tmp/catalog.db"));
    }

    #[test]
    fn seed_defaults() {
        let cli = Cli::try_parse_from(["libris", "--config", "libris.toml", "seed"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(Path::new("libris.toml")));
        match cli.command {
            Command::Seed {
                users,
                books,
                password,
                db,
            } => {
                assert_eq!(users, 1000);
                assert_eq!(books, 1_000_000);
                assert_eq!(password, "password");
                assert!(db.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn init_db_has_no_bind_override() {
        let cli = Cli::try_parse_from(["libris", "init-db", "--db", "x.db"]).unwrap();
        let overrides = cli.command.overrides();
        assert!(overrides.bind_addr.is_none());
        assert_eq!(overrides.db_path.as_deref(), Some("x.db"));
    }
}
