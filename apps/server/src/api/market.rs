//! Public market data routes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{SearchParams, SearchResponse};
use papertrade_core::market_data::{StockBundle, TopGainer};
use papertrade_market_data::NewsArticle;

/// GET /api/stock/{symbol} - cached quote + recent history.
async fn get_stock(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StockBundle>> {
    let bundle = state.market_data_service.get_stock_bundle(&symbol).await?;
    Ok(Json(bundle))
}

/// GET /api/stock/{symbol}/news - recent news with fallback source.
async fn get_stock_news(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<NewsArticle>>> {
    let news = state.market_data_service.get_news(&symbol).await?;
    Ok(Json(news))
}

/// GET /api/search?q= - symbol search, exact matches first.
async fn search_stocks(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SearchResponse>> {
    let result = state.market_data_service.search(&params.q).await?;
    Ok(Json(SearchResponse { result }))
}

/// GET /api/market/top-gainers - fixed-universe board.
async fn top_gainers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TopGainer>>> {
    let gainers = state.market_data_service.top_gainers().await?;
    Ok(Json(gainers))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stock/{symbol}", get(get_stock))
        .route("/stock/{symbol}/news", get(get_stock_news))
        .route("/search", get(search_stocks))
        .route("/market/top-gainers", get(top_gainers))
}
