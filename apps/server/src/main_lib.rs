use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::AuthManager;
use crate::config::Config;
use papertrade_core::discussions::{DiscussionService, DiscussionServiceTrait};
use papertrade_core::market_data::{MarketDataService, MarketDataServiceTrait};
use papertrade_core::trading::{TradingService, TradingServiceTrait};
use papertrade_core::users::{UserService, UserServiceTrait};
use papertrade_storage_sqlite::{
    db, discussions::DiscussionRepository, trading::TradingRepository, users::UserRepository,
};

/// Shared handles for every request handler.
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub trading_service: Arc<dyn TradingServiceTrait>,
    pub discussion_service: Arc<dyn DiscussionServiceTrait>,
    pub market_data_service: Arc<dyn MarketDataServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .init();
    }
}

/// Wires the database, repositories, and services into one state value.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));

    let market_data_service: Arc<dyn MarketDataServiceTrait> = Arc::new(MarketDataService::new(
        config.finnhub_api_key.clone(),
        config.alpha_vantage_api_key.clone(),
        config.news_api_key.clone(),
    ));

    let trading_repository = Arc::new(TradingRepository::new(pool.clone(), writer.clone()));
    let trading_service: Arc<dyn TradingServiceTrait> = Arc::new(TradingService::new(
        trading_repository,
        market_data_service.clone(),
    ));

    let discussion_repository = Arc::new(DiscussionRepository::new(pool.clone(), writer.clone()));
    let discussion_service: Arc<dyn DiscussionServiceTrait> =
        Arc::new(DiscussionService::new(discussion_repository));

    let auth = Arc::new(AuthManager::new(&config.secret_key));

    Ok(Arc::new(AppState {
        user_service,
        trading_service,
        discussion_service,
        market_data_service,
        auth,
    }))
}
