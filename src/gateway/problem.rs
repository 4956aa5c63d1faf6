//! RFC 7807 problem-detail responses.
//!
//! Every rejected request is answered with an `application/problem+json`
//! body naming the offending JSON field. Infrastructure failures answer
//! with a generic 500 problem; cancelled requests with 408, so clients can
//! tell an abandoned request from a server fault.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::EngineError;
use crate::validate::ValidationError;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub status: u16,
    pub detail: String,
    pub instance: Option<String>,
    pub errors: Vec<FieldError>,
}

impl Problem {
    pub fn new(kind: &str, status: StatusCode) -> Self {
        Self {
            kind: kind.to_string(),
            title: None,
            status: status.as_u16(),
            detail: String::new(),
            instance: None,
            errors: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Record the request path the problem occurred on.
    pub fn with_instance(mut self, path: impl Into<String>) -> Self {
        self.instance = Some(path.into());
        self
    }

    pub fn with_error(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.errors.push(FieldError {
            name: name.into(),
            reason: reason.into(),
        });
        self
    }

    /// Map an engine failure to its wire shape. `id_field` is the JSON
    /// field carrying the account id in this request (`id`, `fromId`, or
    /// `toId`), used for business-state errors about that account.
    pub fn from_engine(err: &EngineError, id_field: &'static str) -> Self {
        match err {
            EngineError::Invalid(v) => Self::from(v.clone()),
            EngineError::AccountNotFound(_) | EngineError::NoHistory(_) => {
                Self::new("business", StatusCode::BAD_REQUEST)
                    .with_error(id_field, err.to_string())
            }
            EngineError::InsufficientFunds { .. } => {
                Self::new("business", StatusCode::BAD_REQUEST).with_error("amount", err.to_string())
            }
            EngineError::UnknownCurrency(_) => Self::new("business", StatusCode::BAD_REQUEST)
                .with_error("currency", err.to_string()),
            EngineError::Cancelled => Self::new("cancelled", StatusCode::REQUEST_TIMEOUT)
                .with_detail("request cancelled by client"),
            // never leak driver details to the caller
            EngineError::Store(_) | EngineError::Rates(_) => {
                Self::new("internal", StatusCode::INTERNAL_SERVER_ERROR)
                    .with_detail("internal server error")
            }
        }
    }
}

impl From<ValidationError> for Problem {
    fn from(err: ValidationError) -> Self {
        Self::new("validation", StatusCode::BAD_REQUEST).with_error(err.field(), err.to_string())
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}
