//! CLI argument definitions for the Snipboard binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use snipboard::constants::DEFAULT_MIN_PASSWORD_LEN;

/// Storage backend type
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Backend {
    /// SQLite database (default, production-ready)
    Sqlite,
    /// PostgreSQL database (for managed deployments)
    Postgres,
    /// In-memory with JSON persistence (for development and ephemeral deployments)
    Inmemory,
}

/// Snipboard snippet server
#[derive(Parser, Debug)]
#[command(name = "snipboard")]
#[command(about = "Snipboard: server-rendered snippet manager")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Snipboard server
    Serve(ServeArgs),
    /// Check health of a running Snipboard server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "SNIPBOARD_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "SNIPBOARD_HOST")]
    pub host: String,

    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "SNIPBOARD_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores snipboard.db
    /// For InMemory: stores snipboard.json
    #[arg(short = 'D', long, env = "SNIPBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "SNIPBOARD_POSTGRES_URL")]
    pub postgres_url: Option<String>,

    /// Minimum password length accepted at registration
    #[arg(
        long,
        default_value_t = DEFAULT_MIN_PASSWORD_LEN,
        env = "SNIPBOARD_MIN_PASSWORD_LENGTH"
    )]
    pub min_password_length: usize,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Port of the server to check
    #[arg(short, long, default_value_t = 3000, env = "SNIPBOARD_PORT")]
    pub port: u16,

    /// Host of the server to check
    #[arg(long, default_value = "127.0.0.1", env = "SNIPBOARD_HOST")]
    pub host: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
