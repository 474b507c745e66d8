#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::errors::{Error, Result, TradeError};
    use crate::market_data::{MarketDataServiceTrait, StockBundle, TopGainer};
    use crate::trading::{
        BalanceSheet, Position, TradeSide, TradingRepositoryTrait, TradingService,
        TradingServiceTrait, Transaction,
    };
    use papertrade_market_data::{MarketDataError, NewsArticle, Quote, SearchResult};

    // --- Mock market data gateway ---

    struct MockMarketData {
        prices: HashMap<String, f64>,
        failing: HashSet<String>,
    }

    impl MockMarketData {
        fn new(prices: &[(&str, f64)]) -> Self {
            Self {
                prices: prices
                    .iter()
                    .map(|(s, p)| (s.to_string(), *p))
                    .collect(),
                failing: HashSet::new(),
            }
        }

        fn failing_for(mut self, symbol: &str) -> Self {
            self.failing.insert(symbol.to_string());
            self
        }
    }

    #[async_trait]
    impl MarketDataServiceTrait for MockMarketData {
        async fn get_quote(&self, symbol: &str) -> Result<Quote> {
            if self.failing.contains(symbol) {
                return Err(Error::MarketData(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: format!("quote unavailable for {}", symbol),
                }));
            }
            self.prices
                .get(symbol)
                .map(|p| Quote::with_price(*p))
                .ok_or_else(|| {
                    Error::MarketData(MarketDataError::SymbolNotFound(symbol.to_string()))
                })
        }

        async fn get_stock_bundle(&self, _symbol: &str) -> Result<StockBundle> {
            unimplemented!()
        }

        async fn get_news(&self, _symbol: &str) -> Result<Vec<NewsArticle>> {
            unimplemented!()
        }

        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
            unimplemented!()
        }

        async fn top_gainers(&self) -> Result<Vec<TopGainer>> {
            unimplemented!()
        }
    }

    // --- Mock trading repository ---
    //
    // Mirrors the storage contract in memory: rejects from inside the
    // "transaction", deletes zero-share positions, appends transactions.

    #[derive(Default)]
    struct RepoState {
        balance: f64,
        positions: HashMap<String, i32>,
        transactions: Vec<Transaction>,
    }

    struct MockTradingRepository {
        state: Mutex<RepoState>,
    }

    impl MockTradingRepository {
        fn with_balance(balance: f64) -> Self {
            Self {
                state: Mutex::new(RepoState {
                    balance,
                    ..Default::default()
                }),
            }
        }

        fn shares(&self, symbol: &str) -> Option<i32> {
            self.state.lock().unwrap().positions.get(symbol).copied()
        }

        fn balance(&self) -> f64 {
            self.state.lock().unwrap().balance
        }

        fn transaction_count(&self) -> usize {
            self.state.lock().unwrap().transactions.len()
        }

        fn record(state: &mut RepoState, user_id: &str, symbol: &str, shares: i32, price: f64, side: TradeSide) {
            state.transactions.insert(
                0,
                Transaction {
                    id: uuid::Uuid::new_v4().to_string(),
                    user_id: user_id.to_string(),
                    symbol: symbol.to_string(),
                    shares,
                    price,
                    side,
                    created_at: Utc::now().naive_utc(),
                },
            );
        }
    }

    #[async_trait]
    impl TradingRepositoryTrait for MockTradingRepository {
        async fn execute_buy(
            &self,
            user_id: &str,
            symbol: &str,
            shares: i32,
            price: f64,
        ) -> Result<f64> {
            let mut state = self.state.lock().unwrap();
            let cost = price * shares as f64;
            if cost > state.balance {
                return Err(TradeError::InsufficientFunds {
                    required: cost,
                    available: state.balance,
                }
                .into());
            }
            *state.positions.entry(symbol.to_string()).or_insert(0) += shares;
            Self::record(&mut state, user_id, symbol, shares, price, TradeSide::Buy);
            state.balance -= cost;
            Ok(state.balance)
        }

        async fn execute_sell(
            &self,
            user_id: &str,
            symbol: &str,
            shares: i32,
            price: f64,
        ) -> Result<f64> {
            let mut state = self.state.lock().unwrap();
            let held = state.positions.get(symbol).copied().unwrap_or(0);
            if held < shares {
                return Err(TradeError::InsufficientShares {
                    symbol: symbol.to_string(),
                    requested: shares,
                    held,
                }
                .into());
            }
            if held == shares {
                state.positions.remove(symbol);
            } else {
                state.positions.insert(symbol.to_string(), held - shares);
            }
            Self::record(&mut state, user_id, symbol, shares, price, TradeSide::Sell);
            state.balance += price * shares as f64;
            Ok(state.balance)
        }

        async fn add_funds(&self, _user_id: &str, amount: f64) -> Result<f64> {
            let mut state = self.state.lock().unwrap();
            state.balance += amount;
            Ok(state.balance)
        }

        fn get_balance(&self, _user_id: &str) -> Result<f64> {
            Ok(self.state.lock().unwrap().balance)
        }

        fn get_positions(&self, user_id: &str) -> Result<Vec<Position>> {
            let state = self.state.lock().unwrap();
            let now = Utc::now().naive_utc();
            Ok(state
                .positions
                .iter()
                .map(|(symbol, shares)| Position {
                    id: symbol.clone(),
                    user_id: user_id.to_string(),
                    symbol: symbol.clone(),
                    shares: *shares,
                    created_at: now,
                    updated_at: now,
                })
                .collect())
        }

        fn get_position(&self, user_id: &str, symbol: &str) -> Result<Option<Position>> {
            Ok(self
                .get_positions(user_id)?
                .into_iter()
                .find(|p| p.symbol == symbol))
        }

        fn get_transactions(&self, _user_id: &str) -> Result<Vec<Transaction>> {
            Ok(self.state.lock().unwrap().transactions.clone())
        }
    }

    fn service(
        repository: Arc<MockTradingRepository>,
        market_data: MockMarketData,
    ) -> TradingService {
        TradingService::new(repository, Arc::new(market_data))
    }

    #[tokio::test]
    async fn buy_debits_balance_and_opens_position() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        let svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));

        let new_balance = svc.buy("u1", "AAPL", 5).await.unwrap();

        assert_eq!(new_balance, 500.0);
        assert_eq!(repo.shares("AAPL"), Some(5));
        assert_eq!(repo.transaction_count(), 1);
    }

    #[tokio::test]
    async fn buy_increments_existing_position() {
        let repo = Arc::new(MockTradingRepository::with_balance(2000.0));
        let svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));

        svc.buy("u1", "AAPL", 5).await.unwrap();
        svc.buy("u1", "AAPL", 3).await.unwrap();

        assert_eq!(repo.shares("AAPL"), Some(8));
        assert_eq!(repo.balance(), 1200.0);
    }

    #[tokio::test]
    async fn buy_rejects_invalid_parameters() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        let svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));

        assert!(matches!(
            svc.buy("u1", "", 5).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            svc.buy("u1", "AAPL", 0).await,
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            svc.buy("u1", "AAPL", -3).await,
            Err(Error::Validation(_))
        ));
        assert_eq!(repo.transaction_count(), 0);
    }

    #[tokio::test]
    async fn buy_rejects_insufficient_funds_without_side_effects() {
        let repo = Arc::new(MockTradingRepository::with_balance(100.0));
        let svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));

        let result = svc.buy("u1", "AAPL", 5).await;

        assert!(matches!(
            result,
            Err(Error::Trade(TradeError::InsufficientFunds { .. }))
        ));
        assert_eq!(repo.balance(), 100.0);
        assert_eq!(repo.shares("AAPL"), None);
        assert_eq!(repo.transaction_count(), 0);
    }

    #[tokio::test]
    async fn buy_aborts_when_quote_fails() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        let svc = service(
            repo.clone(),
            MockMarketData::new(&[]).failing_for("AAPL"),
        );

        assert!(matches!(
            svc.buy("u1", "AAPL", 5).await,
            Err(Error::MarketData(_))
        ));
        assert_eq!(repo.balance(), 1000.0);
        assert_eq!(repo.transaction_count(), 0);
    }

    #[tokio::test]
    async fn sell_credits_balance_and_deletes_emptied_position() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        let svc = service(
            repo.clone(),
            MockMarketData::new(&[("AAPL", 100.0)]),
        );
        svc.buy("u1", "AAPL", 5).await.unwrap();

        let svc_sell = service(repo.clone(), MockMarketData::new(&[("AAPL", 120.0)]));
        let new_balance = svc_sell.sell("u1", "AAPL", 5).await.unwrap();

        assert_eq!(new_balance, 1100.0);
        assert_eq!(repo.shares("AAPL"), None, "zero-share row must be deleted");
        assert_eq!(repo.transaction_count(), 2);
    }

    #[tokio::test]
    async fn partial_sell_keeps_the_position() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        let svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));
        svc.buy("u1", "AAPL", 5).await.unwrap();

        svc.sell("u1", "AAPL", 2).await.unwrap();

        assert_eq!(repo.shares("AAPL"), Some(3));
    }

    #[tokio::test]
    async fn sell_rejects_more_shares_than_held() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        let svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));
        svc.buy("u1", "AAPL", 2).await.unwrap();
        let balance_before = repo.balance();

        let result = svc.sell("u1", "AAPL", 5).await;

        assert!(matches!(
            result,
            Err(Error::Trade(TradeError::InsufficientShares { .. }))
        ));
        assert_eq!(repo.balance(), balance_before);
        assert_eq!(repo.shares("AAPL"), Some(2));
    }

    #[tokio::test]
    async fn sell_rejects_symbol_never_held_before_quoting() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));
        // No quote configured: reaching the gateway would error differently
        let svc = service(repo.clone(), MockMarketData::new(&[]));

        let result = svc.sell("u1", "TSLA", 1).await;

        assert!(matches!(
            result,
            Err(Error::Trade(TradeError::InsufficientShares { held: 0, .. }))
        ));
    }

    #[tokio::test]
    async fn add_funds_validates_amount() {
        let repo = Arc::new(MockTradingRepository::with_balance(0.0));
        let svc = service(repo.clone(), MockMarketData::new(&[]));

        assert!(svc.add_funds("u1", 0.0).await.is_err());
        assert!(svc.add_funds("u1", -10.0).await.is_err());
        assert_eq!(svc.add_funds("u1", 250.0).await.unwrap(), 250.0);
    }

    #[tokio::test]
    async fn balance_sheet_omits_positions_with_failed_quotes() {
        let repo = Arc::new(MockTradingRepository::with_balance(5000.0));
        let svc = service(
            repo.clone(),
            MockMarketData::new(&[("AAPL", 100.0), ("MSFT", 50.0)]),
        );
        svc.buy("u1", "AAPL", 10).await.unwrap();
        svc.buy("u1", "MSFT", 10).await.unwrap();

        let svc_degraded = service(
            repo.clone(),
            MockMarketData::new(&[("AAPL", 110.0)]).failing_for("MSFT"),
        );
        let sheet: BalanceSheet = svc_degraded.get_balance_sheet("u1").await.unwrap();

        assert_eq!(sheet.cash_balance, 3500.0);
        assert_eq!(sheet.portfolio.len(), 1);
        assert_eq!(sheet.portfolio[0].symbol, "AAPL");
        assert_eq!(sheet.portfolio[0].position_value, 1100.0);
        assert_eq!(sheet.total_value, 3500.0 + 1100.0);
    }

    #[tokio::test]
    async fn buy_then_sell_round_trip() {
        let repo = Arc::new(MockTradingRepository::with_balance(1000.0));

        let buy_svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 100.0)]));
        assert_eq!(buy_svc.buy("u1", "AAPL", 5).await.unwrap(), 500.0);

        let sell_svc = service(repo.clone(), MockMarketData::new(&[("AAPL", 120.0)]));
        assert_eq!(sell_svc.sell("u1", "AAPL", 5).await.unwrap(), 1100.0);

        assert_eq!(repo.shares("AAPL"), None);

        let transactions = sell_svc.get_transactions("u1").unwrap();
        assert_eq!(transactions.len(), 2);
        let totals: Vec<f64> = transactions
            .iter()
            .map(|t| t.price * t.shares as f64)
            .collect();
        assert!(totals.contains(&500.0));
        assert!(totals.contains(&600.0));
    }
}
