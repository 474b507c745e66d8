use serde::{Deserialize, Serialize};

/// Result from a ticker/symbol search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g., "AAPL")
    pub symbol: String,

    /// Company name or description
    pub description: String,

    /// Display form of the symbol
    #[serde(rename = "displaySymbol")]
    pub display_symbol: String,

    /// Security type (e.g., "Common Stock")
    #[serde(rename = "type")]
    pub security_type: String,

    /// Exchange name, when the provider includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_match_the_provider() {
        let result = SearchResult {
            symbol: "AAPL".to_string(),
            description: "Apple Inc".to_string(),
            display_symbol: "AAPL".to_string(),
            security_type: "Common Stock".to_string(),
            exchange: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["displaySymbol"], "AAPL");
        assert_eq!(json["type"], "Common Stock");
        assert!(json.get("exchange").is_none());
    }
}
