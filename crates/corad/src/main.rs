//! Cora Daemon - Customer support session service
//!
//! Owns the in-memory session store and two-factor auth gate, and serves
//! account, plan, store, and FAQ lookups over a localhost HTTP API.

use anyhow::Result;
use cora_common::CustomerDirectory;
use corad::config::Config;
use corad::server::{self, AppState};
use corad::{session, sweeper};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();

    // RUST_LOG wins over the config-file filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Cora Daemon v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "[CFG] idle_timeout={}s sweep_interval={}s max_nric_attempts={}",
        config.session.idle_timeout_secs,
        config.session.sweep_interval_secs,
        config.session.max_nric_attempts,
    );

    let directory = CustomerDirectory::sample();
    info!(
        "[DIR] Directory loaded: {} customers, {} plans, {} stores",
        directory.customer_count(),
        directory.plans().len(),
        directory.stores().len(),
    );

    let sessions = session::create_shared_sessions(config.idle_timeout());
    sweeper::spawn(sessions.clone(), config.sweep_interval());

    let state = AppState::new(sessions, directory, config.session.max_nric_attempts);

    info!("Cora Daemon ready");
    server::run(state, &config.bind_addr()).await
}
