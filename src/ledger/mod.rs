//! Balances and the append-only transaction ledger.

pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use db::Database;
pub use error::StoreError;
pub use models::{Balance, EntryKind, HistoryPage, SortKey, TransactionRecord};
pub use store::{LedgerEntry, LedgerStore};
