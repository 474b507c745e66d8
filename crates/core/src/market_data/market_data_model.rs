//! Gateway-level market data models.

use serde::{Deserialize, Serialize};

use papertrade_market_data::{HistoricalClose, Quote};

/// The combined quote + historical-series payload served to clients and
/// cached as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBundle {
    pub quote: Quote,
    pub historical: Vec<HistoricalClose>,
}

/// One row of the top-gainers board.
#[derive(Debug, Clone, Serialize)]
pub struct TopGainer {
    pub symbol: String,
    pub price: f64,
    /// Percent change on the day
    pub change: f64,
}
