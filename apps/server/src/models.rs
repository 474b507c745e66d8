//! Request/response bodies where the wire shape differs from the core
//! models; everything else serializes the core model directly.

use serde::{Deserialize, Serialize};

use papertrade_core::trading::Transaction;
use papertrade_market_data::SearchResult;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub balance: f64,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Search results arrive wrapped in a `result` field.
#[derive(Serialize)]
pub struct SearchResponse {
    pub result: Vec<SearchResult>,
}

#[derive(Deserialize)]
pub struct AddFundsRequest {
    pub amount: Option<f64>,
}

#[derive(Deserialize)]
pub struct TradeRequest {
    pub symbol: Option<String>,
    pub shares: Option<i32>,
}

#[derive(Serialize)]
pub struct TradeResponse {
    pub message: &'static str,
    pub new_balance: f64,
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: String,
    pub symbol: String,
    pub shares: i32,
    pub price: f64,
    #[serde(rename = "type")]
    pub side: String,
    pub total: f64,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            symbol: t.symbol,
            shares: t.shares,
            price: t.price,
            side: t.side.to_string(),
            total: t.price * t.shares as f64,
            created_at: t.created_at,
        }
    }
}
