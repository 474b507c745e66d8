use log::{debug, error};
use std::sync::Arc;

use async_trait::async_trait;

use super::trading_model::{BalanceSheet, PositionValuation, Transaction};
use super::trading_traits::{TradingRepositoryTrait, TradingServiceTrait};
use crate::errors::{Result, TradeError, ValidationError};
use crate::market_data::MarketDataServiceTrait;

/// The trade engine: validates orders, prices them against the market data
/// gateway, and delegates the atomic mutation to the repository.
///
/// Every order terminates in success or rejection; there is no partial or
/// pending state. A provider failure while pricing aborts the order before
/// anything is written.
pub struct TradingService {
    repository: Arc<dyn TradingRepositoryTrait>,
    market_data: Arc<dyn MarketDataServiceTrait>,
}

impl TradingService {
    /// Creates a new TradingService instance
    pub fn new(
        repository: Arc<dyn TradingRepositoryTrait>,
        market_data: Arc<dyn MarketDataServiceTrait>,
    ) -> Self {
        Self {
            repository,
            market_data,
        }
    }
}

fn validate_order(symbol: &str, shares: i32) -> Result<()> {
    if symbol.trim().is_empty() || shares <= 0 {
        return Err(ValidationError::InvalidInput("Invalid request parameters".to_string()).into());
    }
    Ok(())
}

#[async_trait]
impl TradingServiceTrait for TradingService {
    async fn buy(&self, user_id: &str, symbol: &str, shares: i32) -> Result<f64> {
        validate_order(symbol, shares)?;

        let quote = self.market_data.get_quote(symbol).await?;
        debug!(
            "Buy order: user={} symbol={} shares={} price={}",
            user_id, symbol, shares, quote.current_price
        );

        self.repository
            .execute_buy(user_id, symbol, shares, quote.current_price)
            .await
    }

    async fn sell(&self, user_id: &str, symbol: &str, shares: i32) -> Result<f64> {
        validate_order(symbol, shares)?;

        // Ownership pre-check before spending an upstream call; the
        // authoritative check re-runs inside the storage transaction.
        let held = self
            .repository
            .get_position(user_id, symbol)?
            .map(|p| p.shares)
            .unwrap_or(0);
        if held < shares {
            return Err(TradeError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: shares,
                held,
            }
            .into());
        }

        let quote = self.market_data.get_quote(symbol).await?;
        debug!(
            "Sell order: user={} symbol={} shares={} price={}",
            user_id, symbol, shares, quote.current_price
        );

        self.repository
            .execute_sell(user_id, symbol, shares, quote.current_price)
            .await
    }

    async fn add_funds(&self, user_id: &str, amount: f64) -> Result<f64> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidInput("Invalid amount".to_string()).into());
        }
        self.repository.add_funds(user_id, amount).await
    }

    async fn get_balance_sheet(&self, user_id: &str) -> Result<BalanceSheet> {
        let cash_balance = self.repository.get_balance(user_id)?;
        let positions = self.repository.get_positions(user_id)?;

        let mut portfolio = Vec::with_capacity(positions.len());
        let mut total_value = cash_balance;

        for position in positions {
            // A failed quote drops this position from the valuation rather
            // than failing the whole sheet.
            match self.market_data.get_quote(&position.symbol).await {
                Ok(quote) => {
                    let position_value = quote.current_price * position.shares as f64;
                    total_value += position_value;
                    portfolio.push(PositionValuation {
                        symbol: position.symbol,
                        shares: position.shares,
                        current_price: quote.current_price,
                        position_value,
                    });
                }
                Err(e) => {
                    error!("Error fetching quote for {}: {}", position.symbol, e);
                }
            }
        }

        Ok(BalanceSheet {
            cash_balance,
            portfolio,
            total_value,
        })
    }

    fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.get_transactions(user_id)
    }
}
