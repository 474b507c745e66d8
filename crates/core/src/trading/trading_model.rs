//! Trading domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(TradeSide::Buy),
            "sell" => Some(TradeSide::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's held share count in one symbol.
///
/// Invariant: `shares > 0` while the row exists; a position that reaches
/// zero shares is deleted, never kept around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub shares: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Immutable record of one executed trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub shares: i32,
    /// Quote price at execution time
    pub price: f64,
    pub side: TradeSide,
    pub created_at: NaiveDateTime,
}

/// Live valuation of one held position.
#[derive(Debug, Clone, Serialize)]
pub struct PositionValuation {
    pub symbol: String,
    pub shares: i32,
    pub current_price: f64,
    pub position_value: f64,
}

/// Cash plus per-position valuations for one user.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub cash_balance: f64,
    pub portfolio: Vec<PositionValuation>,
    pub total_value: f64,
}
