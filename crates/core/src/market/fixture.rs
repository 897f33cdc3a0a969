//! In-memory [`MarketDataClient`] serving canned payloads. Symbols without a fixture fail the
//! call the way an unreachable provider would.

use crate::market::provider::MarketDataClient;
use crate::market::types::NewsArticle;
use crate::time::window::DateWindow;
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FixtureMarketData {
    news: HashMap<String, Vec<NewsArticle>>,
    quotes: HashMap<String, Value>,
    fundamentals: HashMap<String, Value>,
    profiles: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl FixtureMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_news(mut self, symbol: &str, articles: Vec<NewsArticle>) -> Self {
        self.news.insert(symbol.to_string(), articles);
        self
    }

    pub fn with_quote(mut self, symbol: &str, payload: Value) -> Self {
        self.quotes.insert(symbol.to_string(), payload);
        self
    }

    pub fn with_fundamentals(mut self, symbol: &str, payload: Value) -> Self {
        self.fundamentals.insert(symbol.to_string(), payload);
        self
    }

    pub fn with_profile(mut self, symbol: &str, payload: Value) -> Self {
        self.profiles.insert(symbol.to_string(), payload);
        self
    }

    /// `endpoint:symbol` for every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, endpoint: &str, symbol: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{endpoint}:{symbol}"));
        }
    }
}

fn lookup<T: Clone>(map: &HashMap<String, T>, endpoint: &str, symbol: &str) -> Result<T> {
    map.get(symbol)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("market data HTTP 502 from {endpoint}: no fixture for {symbol}"))
}

#[async_trait::async_trait]
impl MarketDataClient for FixtureMarketData {
    fn provider_name(&self) -> &'static str {
        "fixture"
    }

    async fn company_news(&self, symbol: &str, _window: DateWindow) -> Result<Vec<NewsArticle>> {
        self.record("news", symbol);
        lookup(&self.news, "/company-news", symbol)
    }

    async fn quote(&self, symbol: &str) -> Result<Value> {
        self.record("quote", symbol);
        lookup(&self.quotes, "/quote", symbol)
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Value> {
        self.record("fundamentals", symbol);
        lookup(&self.fundamentals, "/stock/metric", symbol)
    }

    async fn profile(&self, symbol: &str) -> Result<Value> {
        self.record("profile", symbol);
        lookup(&self.profiles, "/stock/profile2", symbol)
    }
}
