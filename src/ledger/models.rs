//! Ledger domain types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validate::{ValidationError, query_key_or};

/// Current balance of one account. Ids are caller-assigned; the engine
/// never generates them. A missing row is `Option::<Balance>::None` at the
/// store boundary, not a zero balance.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Balance {
    pub id: i64,
    #[sqlx(rename = "balance")]
    pub amount: Decimal,
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entry_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Outcome,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Income => write!(f, "income"),
            EntryKind::Outcome => write!(f, "outcome"),
        }
    }
}

/// One immutable row of the audit trail. Written exactly once per
/// successful mutation, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: i64,
    /// Account this record is posted against.
    pub balance_id: i64,
    /// The other party; 0 for income/outcome with no counterpart.
    pub counterpart_id: i64,
    pub amount: Decimal,
    pub reason: String,
    pub kind: EntryKind,
    /// Assigned by the store at insert time, never by the caller.
    #[serde(with = "ledger_datetime")]
    pub date: NaiveDateTime,
}

/// `"YYYY-MM-DD HH:MM:SS"` serialization for record timestamps.
mod ledger_datetime {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Closed set of sortable history columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Date,
    Amount,
}

impl SortKey {
    /// Static column name, safe to splice into an ORDER BY clause.
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Date => "date",
            SortKey::Amount => "amount",
        }
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            other => Err(ValidationError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Parsed, bounds-checked history pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPage {
    pub sort: SortKey,
    pub limit: i64,
    pub offset: i64,
}

impl Default for HistoryPage {
    fn default() -> Self {
        Self {
            sort: SortKey::Id,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl HistoryPage {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 1000;

    /// Build from raw query parameters. Absent or empty parameters fall
    /// back to defaults; anything else must parse and sit inside bounds.
    pub fn from_query(
        order_by: Option<&str>,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let sort = query_key_or(order_by, "id").parse::<SortKey>()?;

        let limit = parse_paging("limit", limit, Self::DEFAULT_LIMIT)?;
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::LimitOutOfRange(limit));
        }

        let offset = parse_paging("offset", offset, 0)?;
        if offset < 0 {
            return Err(ValidationError::OffsetOutOfRange(offset));
        }

        Ok(Self {
            sort,
            limit,
            offset,
        })
    }
}

fn parse_paging(
    field: &'static str,
    value: Option<&str>,
    default: i64,
) -> Result<i64, ValidationError> {
    match value {
        Some(s) if !s.is_empty() => s.parse::<i64>().map_err(|_| ValidationError::BadNumber {
            field,
            value: s.to_string(),
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sort_key_closed_set() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!("amount".parse::<SortKey>().unwrap(), SortKey::Amount);
        assert!(matches!(
            "balance_id; DROP TABLE transactions".parse::<SortKey>(),
            Err(ValidationError::UnknownSortKey(_))
        ));
    }

    #[test]
    fn history_page_defaults() {
        let page = HistoryPage::from_query(None, None, None).unwrap();
        assert_eq!(page, HistoryPage::default());
        // empty strings behave like absent parameters
        let page = HistoryPage::from_query(Some(""), Some(""), Some("")).unwrap();
        assert_eq!(page.limit, HistoryPage::DEFAULT_LIMIT);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn history_page_bounds() {
        assert!(matches!(
            HistoryPage::from_query(None, Some("0"), None),
            Err(ValidationError::LimitOutOfRange(0))
        ));
        assert!(matches!(
            HistoryPage::from_query(None, Some("1001"), None),
            Err(ValidationError::LimitOutOfRange(1001))
        ));
        assert!(matches!(
            HistoryPage::from_query(None, None, Some("-1")),
            Err(ValidationError::OffsetOutOfRange(-1))
        ));
        assert!(matches!(
            HistoryPage::from_query(None, Some("10; DELETE"), None),
            Err(ValidationError::BadNumber { field: "limit", .. })
        ));
    }

    #[test]
    fn record_json_shape() {
        let record = TransactionRecord {
            id: 7,
            balance_id: 1,
            counterpart_id: 0,
            amount: dec!(200.00),
            reason: "Some".to_string(),
            kind: EntryKind::Income,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(12, 30, 5)
                .unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "income");
        assert_eq!(json["counterpart_id"], 0);
        assert_eq!(json["date"], "2024-03-01 12:30:05");
        assert_eq!(json["amount"], "200.00");
    }
}
