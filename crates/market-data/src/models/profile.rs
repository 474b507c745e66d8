use serde::{Deserialize, Serialize};

/// Company profile data, as much of it as the provider has.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stock ticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Listing exchange
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

impl CompanyProfile {
    /// True when the provider returned an empty object for the symbol.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ticker.is_none() && self.exchange.is_none()
    }
}
