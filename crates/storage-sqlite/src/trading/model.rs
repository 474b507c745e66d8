//! Database models for positions and transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use papertrade_core::trading::{Position, TradeSide, Transaction};

/// Database model for positions
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub shares: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PositionDB {
    /// Builds a fresh row for a first purchase of a symbol.
    pub fn open(user_id: &str, symbol: &str, shares: i32) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            shares,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            shares: db.shares,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Database model for transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub shares: i32,
    pub price: f64,
    pub side: String,
    pub created_at: NaiveDateTime,
}

impl TransactionDB {
    /// Builds the immutable record of one executed trade.
    pub fn record(user_id: &str, symbol: &str, shares: i32, price: f64, side: TradeSide) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            shares,
            price,
            side: side.as_str().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            shares: db.shares,
            price: db.price,
            // The column is only ever written from TradeSide::as_str
            side: TradeSide::parse(&db.side).unwrap_or(TradeSide::Buy),
            created_at: db.created_at,
        }
    }
}
