use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::{positions, transactions, users};

use super::model::{PositionDB, TransactionDB};
use papertrade_core::errors::{Result, TradeError};
use papertrade_core::trading::{Position, TradeSide, TradingRepositoryTrait, Transaction};

/// Repository for trade execution and trade history.
///
/// The `execute_*` methods run entirely on the writer's connection: the
/// balance/position read, the rejection checks, and all three mutations
/// share one immediate transaction. A rejection rolls back with no
/// observable change.
pub struct TradingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TradingRepository {
    /// Creates a new TradingRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn read_balance(conn: &mut SqliteConnection, user_id: &str) -> Result<f64> {
    users::table
        .find(user_id)
        .select(users::balance)
        .first::<f64>(conn)
        .map_err(|e| e.into_core_error())
}

fn write_balance(conn: &mut SqliteConnection, user_id: &str, new_balance: f64) -> Result<()> {
    diesel::update(users::table.find(user_id))
        .set(users::balance.eq(new_balance))
        .execute(conn)
        .map_err(|e| e.into_core_error())?;
    Ok(())
}

fn find_position(
    conn: &mut SqliteConnection,
    user_id: &str,
    symbol: &str,
) -> Result<Option<PositionDB>> {
    positions::table
        .select(PositionDB::as_select())
        .filter(positions::user_id.eq(user_id))
        .filter(positions::symbol.eq(symbol))
        .first::<PositionDB>(conn)
        .optional()
        .map_err(|e| e.into_core_error())
}

fn record_transaction(
    conn: &mut SqliteConnection,
    user_id: &str,
    symbol: &str,
    shares: i32,
    price: f64,
    side: TradeSide,
) -> Result<()> {
    diesel::insert_into(transactions::table)
        .values(TransactionDB::record(user_id, symbol, shares, price, side))
        .execute(conn)
        .map_err(|e| e.into_core_error())?;
    Ok(())
}

#[async_trait]
impl TradingRepositoryTrait for TradingRepository {
    async fn execute_buy(
        &self,
        user_id: &str,
        symbol: &str,
        shares: i32,
        price: f64,
    ) -> Result<f64> {
        let user_id = user_id.to_string();
        let symbol = symbol.to_string();

        self.writer
            .exec(move |conn| {
                let balance = read_balance(conn, &user_id)?;
                let cost = price * shares as f64;
                if cost > balance {
                    return Err(TradeError::InsufficientFunds {
                        required: cost,
                        available: balance,
                    }
                    .into());
                }

                match find_position(conn, &user_id, &symbol)? {
                    Some(position) => {
                        diesel::update(positions::table.find(&position.id))
                            .set((
                                positions::shares.eq(position.shares + shares),
                                positions::updated_at.eq(chrono::Utc::now().naive_utc()),
                            ))
                            .execute(conn)
                            .map_err(|e| e.into_core_error())?;
                    }
                    None => {
                        diesel::insert_into(positions::table)
                            .values(PositionDB::open(&user_id, &symbol, shares))
                            .execute(conn)
                            .map_err(|e| e.into_core_error())?;
                    }
                }

                record_transaction(conn, &user_id, &symbol, shares, price, TradeSide::Buy)?;

                let new_balance = balance - cost;
                write_balance(conn, &user_id, new_balance)?;
                Ok(new_balance)
            })
            .await
    }

    async fn execute_sell(
        &self,
        user_id: &str,
        symbol: &str,
        shares: i32,
        price: f64,
    ) -> Result<f64> {
        let user_id = user_id.to_string();
        let symbol = symbol.to_string();

        self.writer
            .exec(move |conn| {
                let position = match find_position(conn, &user_id, &symbol)? {
                    Some(position) if position.shares >= shares => position,
                    short => {
                        return Err(TradeError::InsufficientShares {
                            symbol: symbol.clone(),
                            requested: shares,
                            held: short.map(|p| p.shares).unwrap_or(0),
                        }
                        .into());
                    }
                };

                if position.shares == shares {
                    // A position emptied out is deleted, never kept at zero
                    diesel::delete(positions::table.find(&position.id))
                        .execute(conn)
                        .map_err(|e| e.into_core_error())?;
                } else {
                    diesel::update(positions::table.find(&position.id))
                        .set((
                            positions::shares.eq(position.shares - shares),
                            positions::updated_at.eq(chrono::Utc::now().naive_utc()),
                        ))
                        .execute(conn)
                        .map_err(|e| e.into_core_error())?;
                }

                record_transaction(conn, &user_id, &symbol, shares, price, TradeSide::Sell)?;

                let new_balance = read_balance(conn, &user_id)? + price * shares as f64;
                write_balance(conn, &user_id, new_balance)?;
                Ok(new_balance)
            })
            .await
    }

    async fn add_funds(&self, user_id: &str, amount: f64) -> Result<f64> {
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let new_balance = read_balance(conn, &user_id)? + amount;
                write_balance(conn, &user_id, new_balance)?;
                Ok(new_balance)
            })
            .await
    }

    fn get_balance(&self, user_id: &str) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        read_balance(&mut conn, user_id)
    }

    fn get_positions(&self, user_id: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = positions::table
            .select(PositionDB::as_select())
            .filter(positions::user_id.eq(user_id))
            .order(positions::symbol.asc())
            .load::<PositionDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(Position::from).collect())
    }

    fn get_position(&self, user_id: &str, symbol: &str) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_position(&mut conn, user_id, symbol)?.map(Position::from))
    }

    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .select(TransactionDB::as_select())
            .filter(transactions::user_id.eq(user_id))
            .order(transactions::created_at.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }
}
