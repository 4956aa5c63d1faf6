//! Pure input validation. No I/O, no store access.
//!
//! The engine calls these in a fixed order: structural checks (presence,
//! parse) first, then cross-field checks (id distinctness), then
//! state-dependent checks (existence, sufficiency). Each failure
//! short-circuits the rest.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Validation errors, each tied to the request field that failed.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    Missing { field: &'static str },

    #[error("field '{field}' must not be null")]
    Null { field: &'static str },

    #[error("id must be a non-negative integer, got {id}")]
    NegativeId { field: &'static str, id: i64 },

    #[error("sender and receiver ids must differ, both are {0}")]
    EqualIds(i64),

    #[error("amount must be a positive decimal string, got '{0}'")]
    BadAmount(String),

    #[error("reason must be a non-empty string")]
    EmptyReason,

    #[error("balance {have} is below the requested amount {want}")]
    ShortBalance { have: Decimal, want: Decimal },

    #[error("'{field}' must be an integer, got '{value}'")]
    BadNumber { field: &'static str, value: String },

    #[error("unknown sort key '{0}', expected one of: id, date, amount")]
    UnknownSortKey(String),

    #[error("limit must be between 1 and 1000, got {0}")]
    LimitOutOfRange(i64),

    #[error("offset must be non-negative, got {0}")]
    OffsetOutOfRange(i64),
}

impl ValidationError {
    /// The JSON field name to report in a problem detail.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } | Self::Null { field } => field,
            Self::NegativeId { field, .. } => field,
            Self::EqualIds(_) => "toId",
            Self::BadAmount(_) | Self::ShortBalance { .. } => "amount",
            Self::EmptyReason => "reason",
            Self::UnknownSortKey(_) => "order_by",
            Self::LimitOutOfRange(_) => "limit",
            Self::OffsetOutOfRange(_) => "offset",
            Self::BadNumber { field, .. } => field,
        }
    }
}

/// Reject negative account ids.
pub fn validate_id(field: &'static str, id: i64) -> Result<(), ValidationError> {
    if id < 0 {
        return Err(ValidationError::NegativeId { field, id });
    }
    Ok(())
}

/// Reject negative or equal sender/receiver ids.
pub fn validate_ids(from: i64, to: i64) -> Result<(), ValidationError> {
    validate_id("fromId", from)?;
    validate_id("toId", to)?;
    if from == to {
        return Err(ValidationError::EqualIds(from));
    }
    Ok(())
}

/// Parse an amount string as a strictly positive decimal.
pub fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let amount =
        Decimal::from_str(s.trim()).map_err(|_| ValidationError::BadAmount(s.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::BadAmount(s.to_string()));
    }
    Ok(amount)
}

/// Reject a debit that would drive the balance negative.
pub fn validate_balance(balance: Decimal, amount: Decimal) -> Result<(), ValidationError> {
    if balance < amount {
        return Err(ValidationError::ShortBalance {
            have: balance,
            want: amount,
        });
    }
    Ok(())
}

/// Substitute a default for an absent or empty optional query parameter.
pub fn query_key_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn id_negative_rejected() {
        assert!(validate_id("id", 0).is_ok());
        assert!(validate_id("id", 42).is_ok());
        assert_eq!(
            validate_id("fromId", -1),
            Err(ValidationError::NegativeId {
                field: "fromId",
                id: -1
            })
        );
    }

    #[test]
    fn ids_checked_before_distinctness() {
        // negative ids are reported first, even when also equal
        assert_eq!(
            validate_ids(-5, -5),
            Err(ValidationError::NegativeId {
                field: "fromId",
                id: -5
            })
        );
        assert_eq!(validate_ids(1, 1), Err(ValidationError::EqualIds(1)));
        assert!(validate_ids(1, 2).is_ok());
    }

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount("200"), Ok(dec!(200)));
        assert_eq!(parse_amount(" 10.50 "), Ok(dec!(10.50)));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-3").is_err());
    }

    #[test]
    fn balance_sufficiency() {
        assert!(validate_balance(dec!(100), dec!(100)).is_ok());
        assert_eq!(
            validate_balance(dec!(50), dec!(100)),
            Err(ValidationError::ShortBalance {
                have: dec!(50),
                want: dec!(100)
            })
        );
    }

    #[test]
    fn query_key_defaults() {
        assert_eq!(query_key_or(None, "id"), "id");
        assert_eq!(query_key_or(Some(""), "id"), "id");
        assert_eq!(query_key_or(Some("date"), "id"), "date");
    }

    #[test]
    fn error_names_the_json_field() {
        assert_eq!(parse_amount("x").unwrap_err().field(), "amount");
        assert_eq!(validate_ids(3, 3).unwrap_err().field(), "toId");
        assert_eq!(
            ValidationError::Missing { field: "reason" }.field(),
            "reason"
        );
    }
}
