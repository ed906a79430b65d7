//! HTTP API server for the AgroLend settlement node.
//!
//! The browser client consumes these endpoints directly, so the response
//! contract is rigid: a chain operation answers 200 with its
//! `TransactionResult` when it succeeded, 400 with the failing
//! `TransactionResult` when the operation was rejected, and 500 with an
//! empty JSON object when the node itself broke (including unreadable
//! request bodies).

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use agrolend_core::{parse_amount, PaymentProvider, TransactionResult};
use agrolend_provider::{PayoutRequest, ProviderError};

use crate::state::AppState;

// --- Request / response types ---

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub admin_address: String,
    pub tokens: Vec<String>,
    pub uptime_secs: u64,
}

#[derive(Deserialize)]
pub struct MintRequest {
    /// Currency symbol of the fiat token to mint (e.g. "USDC").
    pub fiat: String,
    /// Recipient address.
    pub account: String,
    /// Amount in the token's smallest unit, as a decimal string.
    pub amount: String,
}

#[derive(Deserialize)]
pub struct SettleRequest {
    pub reference: String,
    #[serde(default = "default_provider")]
    pub provider: PaymentProvider,
}

fn default_provider() -> PaymentProvider {
    PaymentProvider::Paystack
}

#[derive(Deserialize)]
pub struct BanksQuery {
    pub currency: Option<String>,
}

#[derive(Deserialize)]
pub struct ResolveAccountQuery {
    pub account_number: String,
    pub bank_code: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// --- Response helpers ---

/// 200 for a successful operation, 400 for a rejected one; the result body
/// travels unchanged either way.
fn result_response(result: TransactionResult) -> Response {
    let code = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (code, Json(result)).into_response()
}

/// The node broke: 500 with an empty object.
fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({}))).into_response()
}

// --- Handlers ---

async fn handle_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        admin_address: state.chain.admin_address().to_string(),
        tokens: state
            .registry
            .symbols()
            .into_iter()
            .map(str::to_string)
            .collect(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn handle_mint(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MintRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return internal_error();
    };

    let Some(token) = state.registry.by_symbol(&req.fiat) else {
        return result_response(TransactionResult::failure("Unknown fiat token."));
    };
    let Ok(account) = req.account.parse() else {
        return result_response(TransactionResult::failure("Invalid account address."));
    };
    let amount = match parse_amount(&req.amount) {
        Ok(amount) => amount,
        Err(e) => return result_response(TransactionResult::failure(e.to_string())),
    };

    tracing::info!(fiat = %req.fiat, account = %req.account, amount = %req.amount, "mint requested");
    result_response(state.chain.mint(token.fiat, amount, account).await)
}

async fn handle_supply_on_behalf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return internal_error();
    };
    match state
        .orchestrator
        .supply_on_behalf(&req.reference, req.provider)
        .await
    {
        Ok(result) => result_response(result),
        Err(e) => {
            tracing::error!(reference = %req.reference, error = %e, "supply settlement error");
            internal_error()
        }
    }
}

async fn handle_repay_on_behalf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return internal_error();
    };
    match state
        .orchestrator
        .repay_on_behalf(&req.reference, req.provider)
        .await
    {
        Ok(result) => result_response(result),
        Err(e) => {
            tracing::error!(reference = %req.reference, error = %e, "repay settlement error");
            internal_error()
        }
    }
}

async fn handle_banks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BanksQuery>,
) -> Response {
    match state.bank.list_banks(query.currency.as_deref()).await {
        Ok(banks) => Json(banks).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "bank list fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn handle_resolve_account(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveAccountQuery>,
) -> Response {
    match state
        .bank
        .resolve_account(&query.account_number, &query.bank_code)
        .await
    {
        Ok(account) => Json(account).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "account resolution failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn handle_payout(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PayoutRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(req)) = payload else {
        return internal_error();
    };
    match state.bank.payout(&req).await {
        Ok(transfer) => Json(transfer).into_response(),
        Err(ProviderError::Api(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(reference = %req.reference, error = %e, "payout failed");
            internal_error()
        }
    }
}

// --- Server ---

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(handle_status))
        .route("/api/mint", post(handle_mint))
        .route("/api/supply-on-behalf", post(handle_supply_on_behalf))
        .route("/api/repay-on-behalf", post(handle_repay_on_behalf))
        .route("/api/banks", get(handle_banks))
        .route("/api/resolve-account", get(handle_resolve_account))
        .route("/api/payout", post(handle_payout))
        .with_state(state)
}

pub async fn start_api_server(listen_addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
