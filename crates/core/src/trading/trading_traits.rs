//! Trading repository and service traits.

use async_trait::async_trait;

use super::trading_model::{BalanceSheet, Position, Transaction};
use crate::errors::Result;

/// Trait defining the contract for trade persistence.
///
/// The `execute_*` methods are atomic: the funds/shares check, the position
/// upsert or delete, the transaction insert, and the balance update all
/// happen inside one storage transaction, and a rejection from inside it
/// leaves no observable change.
#[async_trait]
pub trait TradingRepositoryTrait: Send + Sync {
    /// Applies a buy order at the given price. Returns the new balance.
    ///
    /// Fails with `TradeError::InsufficientFunds` when the cost exceeds the
    /// balance read inside the transaction.
    async fn execute_buy(
        &self,
        user_id: &str,
        symbol: &str,
        shares: i32,
        price: f64,
    ) -> Result<f64>;

    /// Applies a sell order at the given price. Returns the new balance.
    ///
    /// Fails with `TradeError::InsufficientShares` when the position read
    /// inside the transaction is missing or too small. A position reaching
    /// exactly zero shares is deleted.
    async fn execute_sell(
        &self,
        user_id: &str,
        symbol: &str,
        shares: i32,
        price: f64,
    ) -> Result<f64>;

    /// Credits the user's balance. Returns the new balance.
    async fn add_funds(&self, user_id: &str, amount: f64) -> Result<f64>;

    /// Reads the user's current cash balance.
    fn get_balance(&self, user_id: &str) -> Result<f64>;

    /// Lists the user's open positions.
    fn get_positions(&self, user_id: &str) -> Result<Vec<Position>>;

    /// Reads one position, or `None` when the user holds no shares.
    fn get_position(&self, user_id: &str, symbol: &str) -> Result<Option<Position>>;

    /// Lists the user's transactions, newest first.
    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for the trade engine.
#[async_trait]
pub trait TradingServiceTrait: Send + Sync {
    /// Validates and executes a buy order. Returns the new balance.
    async fn buy(&self, user_id: &str, symbol: &str, shares: i32) -> Result<f64>;

    /// Validates and executes a sell order. Returns the new balance.
    async fn sell(&self, user_id: &str, symbol: &str, shares: i32) -> Result<f64>;

    /// Credits cash to the user. Returns the new balance.
    async fn add_funds(&self, user_id: &str, amount: f64) -> Result<f64>;

    /// Values every position at live quotes, best effort per symbol.
    async fn get_balance_sheet(&self, user_id: &str) -> Result<BalanceSheet>;

    /// Lists the user's trade history, newest first.
    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
}
