//! Request DTOs with tri-state fields.
//!
//! JSON bodies distinguish an absent field from an explicit `null` from a
//! present value; handlers validate against the tag and name the exact
//! field in the problem response.

use serde::{Deserialize, Deserializer};

use crate::validate::ValidationError;

/// Tri-state JSON field: absent, null, or present.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    /// The field must be present and non-null.
    pub fn require(&self, field: &'static str) -> Result<&T, ValidationError> {
        match self {
            Field::Missing => Err(ValidationError::Missing { field }),
            Field::Null => Err(ValidationError::Null { field }),
            Field::Value(v) => Ok(v),
        }
    }

    /// Present value, if any; `Missing` and `Null` both read as absent.
    pub fn opt(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

// `#[serde(default)]` on the container keeps absent fields at `Missing`;
// this impl only runs when the key is present.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferBody {
    pub from_id: Field<i64>,
    pub to_id: Field<i64>,
    pub amount: Field<String>,
    pub reason: Field<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeBody {
    pub to_id: Field<i64>,
    pub amount: Field<String>,
    pub reason: Field<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutcomeBody {
    pub from_id: Field<i64>,
    pub amount: Field<String>,
    pub reason: Field<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BalanceQuery {
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub order_by: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
