//! Token-gated trading routes.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{AddFundsRequest, TradeRequest, TradeResponse, TransactionResponse};
use papertrade_core::trading::BalanceSheet;

/// GET /api/trading/balance - cash plus live position valuations.
async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<BalanceSheet>> {
    let sheet = state.trading_service.get_balance_sheet(&user.id).await?;
    Ok(Json(sheet))
}

/// POST /api/trading/add-funds
async fn add_funds(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<AddFundsRequest>,
) -> ApiResult<Json<TradeResponse>> {
    let amount = payload.amount.unwrap_or(0.0);
    let new_balance = state.trading_service.add_funds(&user.id, amount).await?;
    Ok(Json(TradeResponse {
        message: "Funds added successfully",
        new_balance,
    }))
}

/// POST /api/trading/buy
async fn buy_stock(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<TradeRequest>,
) -> ApiResult<Json<TradeResponse>> {
    let symbol = payload.symbol.unwrap_or_default();
    let shares = payload.shares.unwrap_or(0);
    let new_balance = state.trading_service.buy(&user.id, &symbol, shares).await?;
    Ok(Json(TradeResponse {
        message: "Stock purchased successfully",
        new_balance,
    }))
}

/// POST /api/trading/sell
async fn sell_stock(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<TradeRequest>,
) -> ApiResult<Json<TradeResponse>> {
    let symbol = payload.symbol.unwrap_or_default();
    let shares = payload.shares.unwrap_or(0);
    let new_balance = state.trading_service.sell(&user.id, &symbol, shares).await?;
    Ok(Json(TradeResponse {
        message: "Stock sold successfully",
        new_balance,
    }))
}

/// GET /api/trading/transactions - trade history, newest first.
async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    let transactions = state.trading_service.get_transactions(&user.id)?;
    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trading/balance", get(get_balance))
        .route("/trading/add-funds", post(add_funds))
        .route("/trading/buy", post(buy_stock))
        .route("/trading/sell", post(sell_stock))
        .route("/trading/transactions", get(get_transactions))
}
