use std::{net::SocketAddr, time::Duration};

/// Server configuration, read once at startup.
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HS256 signing key for session tokens
    pub secret_key: String,
    pub finnhub_api_key: String,
    pub alpha_vantage_api_key: String,
    pub news_api_key: String,
}

fn require_env(key: &str) -> String {
    std::env::var(key)
        .unwrap_or_else(|_| panic!("Missing required environment variable: {}", key))
}

impl Config {
    /// Reads configuration from the environment (and `.env` when present).
    ///
    /// The signing key and the three provider API keys are mandatory; the
    /// process refuses to start without them.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("PT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5001".to_string())
            .parse()
            .expect("Invalid PT_LISTEN_ADDR");
        let db_path =
            std::env::var("PT_DB_PATH").unwrap_or_else(|_| "./db/papertrade.db".to_string());
        let cors_allow = std::env::var("PT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("PT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .unwrap_or(30000);

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key: require_env("SECRET_KEY"),
            finnhub_api_key: require_env("FINNHUB_API_KEY"),
            alpha_vantage_api_key: require_env("ALPHA_VANTAGE_API_KEY"),
            news_api_key: require_env("NEWS_API_KEY"),
        }
    }
}
