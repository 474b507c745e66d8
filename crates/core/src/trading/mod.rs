//! Trading module - positions, transactions, and order execution.

mod trading_model;
mod trading_service;
mod trading_traits;

#[cfg(test)]
mod trading_service_tests;

// Re-export the public interface
pub use trading_model::{BalanceSheet, Position, PositionValuation, TradeSide, Transaction};
pub use trading_service::TradingService;
pub use trading_traits::{TradingRepositoryTrait, TradingServiceTrait};
