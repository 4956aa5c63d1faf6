//! Money-movement use cases over the ledger store.

pub mod error;
pub mod service;

pub use error::EngineError;
pub use service::TransferEngine;
