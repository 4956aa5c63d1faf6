use rust_decimal::Decimal;
use thiserror::Error;

use crate::fx::FxError;
use crate::ledger::StoreError;
use crate::validate::ValidationError;

/// Engine-level failure taxonomy.
///
/// Validation and business-state variants are detected before any mutation
/// and map to client errors; `Cancelled` is kept apart so abandoned
/// requests are never logged as server faults; `Store` and `Rates` are
/// infrastructure failures.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("no balance with id {0}")]
    AccountNotFound(i64),

    #[error("not enough money for transaction: have {have}, want {want}")]
    InsufficientFunds { have: Decimal, want: Decimal },

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("no transactions for balance id {0}")]
    NoHistory(i64),

    #[error("operation cancelled by caller")]
    Cancelled,

    #[error("store failure: {0}")]
    Store(StoreError),

    #[error("rate fetch failure: {0}")]
    Rates(FxError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cancelled => EngineError::Cancelled,
            StoreError::NoSuchAccount(id) => EngineError::AccountNotFound(id),
            StoreError::BalanceTooLow { have, want } => {
                EngineError::InsufficientFunds { have, want }
            }
            other => EngineError::Store(other),
        }
    }
}

impl From<FxError> for EngineError {
    fn from(err: FxError) -> Self {
        match err {
            FxError::UnknownCurrency(code) => EngineError::UnknownCurrency(code),
            other => EngineError::Rates(other),
        }
    }
}

impl EngineError {
    /// Infrastructure failures get logged at error level and answered with
    /// a generic server fault; everything else is the caller's problem.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, EngineError::Store(_) | EngineError::Rates(_))
    }
}
