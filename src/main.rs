//! ledgerd entry point: config, logging, pool, engine, gateway.

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use ledgerd::config::AppConfig;
use ledgerd::engine::TransferEngine;
use ledgerd::fx::{Converter, HttpRateSource, RateCache};
use ledgerd::gateway::{self, AppState};
use ledgerd::ledger::{Database, LedgerStore};
use ledgerd::logging::init_logging;
use ledgerd::telemetry::TracingLog;

fn config_path() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "config/dev.toml".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(config_path())?;
    let _log_guard = init_logging(&config.log);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        "starting {}",
        config.application.name
    );

    let db = Arc::new(
        Database::connect(&config.database.url(), config.database.max_connections).await?,
    );
    let store = LedgerStore::new(db.pool().clone());

    let rates = Arc::new(HttpRateSource::new(
        config.rates.url.clone(),
        config.rates.base_currency.clone(),
    ));
    let cache = RateCache::new(rates, Duration::from_secs(config.rates.ttl_secs));
    let converter = Converter::new(
        cache,
        config.rates.base_currency.clone(),
        config.rates.cash_increment,
    );

    let log = Arc::new(TracingLog::new("ledgerd"));
    let engine = Arc::new(TransferEngine::new(store, converter, log.clone()));

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
                shutdown.cancel();
            }
        });
    }

    let state = Arc::new(AppState::new(engine, db, log, shutdown));
    gateway::run_server(state, &config.application.host, config.application.port).await
}
