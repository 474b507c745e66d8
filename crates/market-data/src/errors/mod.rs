//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to an upstream market data provider.
///
/// Every variant is terminal for the request that triggered it: there is no
/// retry layer, callers either degrade (news, history) or abort (trades).
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider answered but the payload lacks the data we need
    /// (e.g. a quote without a current price, a response without a series).
    #[error("Missing data: {0}")]
    MissingData(String),

    /// The provider rate limited the request (HTTP 429, or 403 on quota).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
