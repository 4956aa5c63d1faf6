//! ledgerd - balances and a transaction ledger over PostgreSQL.
//!
//! # Modules
//!
//! - [`validate`] - pure input predicates, no I/O
//! - [`ledger`] - balances, the append-only transaction log, the store
//! - [`engine`] - income / outcome / transfer / read use cases
//! - [`fx`] - currency rate fetch, cache, and cash-rounded conversion
//! - [`gateway`] - axum routes and problem-detail responses
//! - [`telemetry`] - injected logging port
//! - [`config`] / [`logging`] - TOML config and tracing setup

pub mod config;
pub mod engine;
pub mod fx;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod telemetry;
pub mod validate;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use engine::{EngineError, TransferEngine};
pub use fx::{Converter, HttpRateSource, RateCache};
pub use gateway::{AppState, Problem};
pub use ledger::{
    Balance, Database, EntryKind, HistoryPage, LedgerEntry, LedgerStore, SortKey, StoreError,
    TransactionRecord,
};
pub use telemetry::{OpsLog, TracingLog};
pub use validate::ValidationError;
