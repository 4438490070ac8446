use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use sitework::api::{self, AppState};
use sitework::config::ServerArgs;
use sitework::db::connection;
use sitework::services::billing::{BillingNotifier, spawn_billing_logger};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ServerArgs) -> sitework::Result<()> {
    let pool = connection::create_pool(&args.db).await?;
    connection::run_migrations(&pool).await?;
    tracing::info!(db = %args.db.display(), "database ready");

    let (billing, billing_rx) = BillingNotifier::channel();
    spawn_billing_logger(billing_rx);

    let state = Arc::new(AppState { pool, billing });
    api::serve(&args.bind, state).await
}
