use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("rate request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("rate {0} is not representable as a decimal")]
    BadRate(f64),
}
