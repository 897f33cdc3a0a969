use crate::config::Settings;
use crate::market::types::NewsArticle;
use crate::time::window::DateWindow;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

const TOKEN_HEADER: &str = "x-finnhub-token";

#[async_trait::async_trait]
pub trait MarketDataClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn company_news(&self, symbol: &str, window: DateWindow) -> Result<Vec<NewsArticle>>;

    async fn quote(&self, symbol: &str) -> Result<Value>;

    async fn fundamentals(&self, symbol: &str) -> Result<Value>;

    async fn profile(&self, symbol: &str) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct FinnhubClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FinnhubClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_market_data_api_key()?.to_string();
        let base_url = settings.market_data_base_url().to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.market_data_timeout_secs))
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, HeaderValue::from_str(&self.api_key)?);
        Ok(headers)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let res = self
            .http
            .get(self.url(path))
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .with_context(|| format!("market data request to {path} failed"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("failed to read market data response from {path}"))?;

        if !status.is_success() {
            anyhow::bail!("market data HTTP {status} from {path}: {text}");
        }

        serde_json::from_str::<Value>(&text)
            .with_context(|| format!("market data response from {path} is not valid JSON: {text}"))
    }
}

#[async_trait::async_trait]
impl MarketDataClient for FinnhubClient {
    fn provider_name(&self) -> &'static str {
        "finnhub"
    }

    async fn company_news(&self, symbol: &str, window: DateWindow) -> Result<Vec<NewsArticle>> {
        let symbol = require_symbol(symbol)?;
        let raw = self
            .get_json(
                "/company-news",
                &[
                    ("symbol", symbol.to_string()),
                    ("from", window.from.format("%Y-%m-%d").to_string()),
                    ("to", window.to.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;

        serde_json::from_value::<Vec<NewsArticle>>(raw)
            .context("failed to parse company news into a list of articles")
    }

    async fn quote(&self, symbol: &str) -> Result<Value> {
        let symbol = require_symbol(symbol)?;
        self.get_json("/quote", &[("symbol", symbol.to_string())])
            .await
    }

    async fn fundamentals(&self, symbol: &str) -> Result<Value> {
        let symbol = require_symbol(symbol)?;
        self.get_json(
            "/stock/metric",
            &[("symbol", symbol.to_string()), ("metric", "all".to_string())],
        )
        .await
    }

    async fn profile(&self, symbol: &str) -> Result<Value> {
        let symbol = require_symbol(symbol)?;
        self.get_json("/stock/profile2", &[("symbol", symbol.to_string())])
            .await
    }
}

fn require_symbol(symbol: &str) -> Result<&str> {
    let symbol = symbol.trim();
    anyhow::ensure!(!symbol.is_empty(), "ticker must be non-empty");
    Ok(symbol)
}
