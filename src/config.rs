//! Server configuration from flags and environment.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the sitework server.
#[derive(Parser, Debug)]
#[command(version, about = "Task and dependency tracking service")]
pub struct ServerArgs {
    /// Address to bind the API server to.
    #[arg(long, env = "SITEWORK_ADDR", default_value = "127.0.0.1:8700")]
    pub bind: String,

    /// Path to the SQLite database file.
    #[arg(long, env = "SITEWORK_DB", default_value = "sitework.db")]
    pub db: PathBuf,

    /// Log filter when RUST_LOG is unset.
    #[arg(long, env = "SITEWORK_LOG", default_value = "info")]
    pub log_level: String,
}
