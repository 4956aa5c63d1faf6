//! HTTP endpoint handlers.
//!
//! Handlers parse the body themselves (from `Bytes`) so a malformed JSON
//! payload produces a problem detail instead of axum's default rejection.
//! Path ids are taken as strings for the same reason. Every problem
//! response carries the request path as its `instance`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

use crate::ledger::{HistoryPage, TransactionRecord};
use crate::loc;

use super::problem::Problem;
use super::state::AppState;
use super::types::{BalanceQuery, HistoryQuery, IncomeBody, OutcomeBody, TransferBody};

fn parse_body<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, Problem> {
    serde_json::from_slice(bytes).map_err(|e| {
        Problem::new("validation", StatusCode::BAD_REQUEST)
            .with_detail("malformed JSON body")
            .with_error("body", e.to_string())
    })
}

fn parse_path_id(raw: &str) -> Result<i64, Problem> {
    raw.parse::<i64>().map_err(|_| {
        Problem::new("validation", StatusCode::BAD_REQUEST)
            .with_error("id", format!("id must be an integer, got '{raw}'"))
    })
}

/// GET /balances/{id}[?currency=CODE]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<String>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<String>, Problem> {
    balance_inner(state, id, query)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

async fn balance_inner(
    state: Arc<AppState>,
    id: String,
    query: BalanceQuery,
) -> Result<Json<String>, Problem> {
    let id = parse_path_id(&id)?;

    let (amount, currency) = state
        .engine
        .balance(&state.shutdown, id, query.currency.as_deref())
        .await
        .map_err(|e| Problem::from_engine(&e, "id"))?;

    Ok(Json(format!("{amount} {currency}")))
}

/// GET /balances/history/{id}?order_by&limit&offset
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<TransactionRecord>>, Problem> {
    history_inner(state, id, query)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

async fn history_inner(
    state: Arc<AppState>,
    id: String,
    query: HistoryQuery,
) -> Result<Json<Vec<TransactionRecord>>, Problem> {
    let id = parse_path_id(&id)?;

    let page = HistoryPage::from_query(
        query.order_by.as_deref(),
        query.limit.as_deref(),
        query.offset.as_deref(),
    )?;

    let records = state
        .engine
        .history(&state.shutdown, id, &page)
        .await
        .map_err(|e| Problem::from_engine(&e, "id"))?;

    Ok(Json(records))
}

/// POST /balances/transfer
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    bytes: Bytes,
) -> Result<Json<&'static str>, Problem> {
    transfer_inner(state, bytes)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

async fn transfer_inner(
    state: Arc<AppState>,
    bytes: Bytes,
) -> Result<Json<&'static str>, Problem> {
    let body: TransferBody = parse_body(&bytes)?;

    let from = *body.from_id.require("fromId")?;
    let to = *body.to_id.require("toId")?;
    let amount = body.amount.require("amount")?;
    let reason = body.reason.require("reason")?;

    state
        .engine
        .transfer(&state.shutdown, from, to, amount, reason)
        .await
        .map_err(|e| Problem::from_engine(&e, "fromId"))?;

    Ok(Json("Done!"))
}

/// POST /balances/income
pub async fn income(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    bytes: Bytes,
) -> Result<Json<&'static str>, Problem> {
    income_inner(state, bytes)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

async fn income_inner(state: Arc<AppState>, bytes: Bytes) -> Result<Json<&'static str>, Problem> {
    let body: IncomeBody = parse_body(&bytes)?;

    let to = *body.to_id.require("toId")?;
    let amount = body.amount.require("amount")?;
    let reason = body.reason.opt().map(String::as_str).unwrap_or_default();

    state
        .engine
        .income(&state.shutdown, to, amount, reason)
        .await
        .map_err(|e| Problem::from_engine(&e, "toId"))?;

    Ok(Json("Done!"))
}

/// POST /balances/outcome
pub async fn outcome(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    bytes: Bytes,
) -> Result<Json<&'static str>, Problem> {
    outcome_inner(state, bytes)
        .await
        .map_err(|p| p.with_instance(uri.path()))
}

async fn outcome_inner(state: Arc<AppState>, bytes: Bytes) -> Result<Json<&'static str>, Problem> {
    let body: OutcomeBody = parse_body(&bytes)?;

    let from = *body.from_id.require("fromId")?;
    let amount = body.amount.require("amount")?;
    let reason = body.reason.opt().map(String::as_str).unwrap_or_default();

    state
        .engine
        .outcome(&state.shutdown, from, amount, reason)
        .await
        .map_err(|e| Problem::from_engine(&e, "fromId"))?;

    Ok(Json("Done!"))
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.db.health_check().await {
        Ok(()) => Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))
        .into_response(),
        Err(e) => {
            state.log.error(&format!("health check failed: {e}"), loc!());
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded" })),
            )
                .into_response()
        }
    }
}
