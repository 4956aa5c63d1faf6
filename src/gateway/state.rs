use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::engine::TransferEngine;
use crate::ledger::Database;
use crate::telemetry::OpsLog;

/// Shared gateway state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TransferEngine>,
    pub db: Arc<Database>,
    pub log: Arc<dyn OpsLog>,
    /// Root token; cancelled on shutdown so in-flight store calls surface
    /// as cancelled instead of half-finishing.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        engine: Arc<TransferEngine>,
        db: Arc<Database>,
        log: Arc<dyn OpsLog>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            engine,
            db,
            log,
            shutdown,
        }
    }
}
