//! Currency conversion: rate source, cache, converter.

pub mod cache;
pub mod convert;
pub mod error;
pub mod rates;

pub use cache::RateCache;
pub use convert::{Converter, round_cash};
pub use error::FxError;
pub use rates::{HttpRateSource, RateSource, RateTable};
