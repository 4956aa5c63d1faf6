use rust_decimal::Decimal;
use thiserror::Error;

/// Failures surfaced by the ledger store.
///
/// `NoSuchAccount` and `BalanceTooLow` are business states detected under
/// the row lock; `NoRowsAffected` is a store anomaly (a statement against a
/// row that was just confirmed to exist changed nothing) and is never shown
/// to callers as a business failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("no balance with id {0}")]
    NoSuchAccount(i64),

    #[error("balance {have} is below the requested amount {want}")]
    BalanceTooLow { have: Decimal, want: Decimal },

    #[error("statement affected no rows")]
    NoRowsAffected,

    #[error("operation cancelled by caller")]
    Cancelled,
}
