use serde::{Deserialize, Serialize};

/// Real-time quote snapshot for one symbol.
///
/// Field layout follows Finnhub's `/quote` payload; only the current price is
/// guaranteed, everything else is whatever the provider had for the day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Current price (required)
    pub current_price: f64,

    /// Absolute change since previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,

    /// Percent change since previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<f64>,

    /// High price of the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,

    /// Low price of the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,

    /// Open price of the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,

    /// Previous close price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,

    /// Quote timestamp (Unix seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Quote {
    /// Create a quote carrying only a current price.
    pub fn with_price(current_price: f64) -> Self {
        Self {
            current_price,
            change: None,
            percent_change: None,
            high: None,
            low: None,
            open: None,
            previous_close: None,
            timestamp: None,
        }
    }
}
