use crate::domain::comparison::{
    extract_metrics, metric_names, rank, unavailable_row, ComparisonResult, EndpointPayloads,
    MetricDef,
};
use crate::domain::normalize_ticker;
use crate::market::MarketDataClient;
use anyhow::Context;
use std::collections::BTreeMap;

pub const MIN_TICKERS: usize = 2;

/// Normalizes and de-duplicates the requested tickers, keeping first occurrences in order.
pub fn normalize_tickers<S: AsRef<str>>(raw: &[S]) -> anyhow::Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for t in raw {
        let ticker = normalize_ticker(t.as_ref()).context("tickers must be non-empty")?;
        if !out.contains(&ticker) {
            out.push(ticker);
        }
    }
    anyhow::ensure!(
        out.len() >= MIN_TICKERS,
        "at least {MIN_TICKERS} distinct tickers are required (got {})",
        out.len()
    );
    Ok(out)
}

/// Fetches every ticker in turn and ranks the directed metrics of `defs`.
///
/// A ticker whose fetches fail gets an all-null row; the comparison itself never fails.
pub async fn compare_tickers(
    market: &dyn MarketDataClient,
    defs: &[MetricDef],
    tickers: &[String],
) -> ComparisonResult {
    let mut data = BTreeMap::new();

    for ticker in tickers {
        let row = match fetch_payloads(market, ticker).await {
            Ok(payloads) => extract_metrics(defs, &payloads),
            Err(err) => {
                tracing::warn!(%ticker, error = %format!("{err:#}"), "comparison data unavailable");
                unavailable_row(defs)
            }
        };
        data.insert(ticker.clone(), row);
    }

    let ranking = rank(defs, tickers, &data);
    tracing::info!(
        tickers = tickers.len(),
        ranked_metrics = ranking.len(),
        "comparison computed"
    );

    ComparisonResult {
        metrics: metric_names(defs),
        data,
        ranking,
    }
}

async fn fetch_payloads(
    market: &dyn MarketDataClient,
    ticker: &str,
) -> anyhow::Result<EndpointPayloads> {
    let fundamentals = market
        .fundamentals(ticker)
        .await
        .context("fundamentals fetch failed")?;
    let quote = market.quote(ticker).await.context("quote fetch failed")?;
    let profile = market
        .profile(ticker)
        .await
        .context("profile fetch failed")?;

    Ok(EndpointPayloads {
        quote,
        fundamentals,
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comparison::{MetricValue, METRICS};
    use crate::market::fixture::FixtureMarketData;
    use serde_json::json;

    fn with_ticker(market: FixtureMarketData, ticker: &str, pe: f64) -> FixtureMarketData {
        market
            .with_fundamentals(ticker, json!({"metric": {"peTTM": pe, "epsTTM": 2.5}}))
            .with_quote(ticker, json!({"c": 100.0}))
            .with_profile(ticker, json!({"finnhubIndustry": "Technology"}))
    }

    fn tickers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalization_dedupes_and_requires_two() {
        assert_eq!(
            normalize_tickers(&["aapl", "MSFT", "Aapl "]).unwrap(),
            tickers(&["AAPL", "MSFT"])
        );
        assert!(normalize_tickers(&["aapl", "AAPL"]).is_err());
        assert!(normalize_tickers(&["aapl"]).is_err());
        assert!(normalize_tickers(&["aapl", ""]).is_err());
        assert!(normalize_tickers::<&str>(&[]).is_err());
    }

    #[tokio::test]
    async fn ranks_lower_pe_as_best() {
        let market = with_ticker(with_ticker(FixtureMarketData::new(), "A", 10.0), "B", 20.0);

        let result = compare_tickers(&market, METRICS, &tickers(&["A", "B"])).await;
        assert_eq!(result.ranking["P/E Ratio"].best, "A");
        assert_eq!(result.ranking["P/E Ratio"].worst, "B");
        assert_eq!(result.metrics.len(), METRICS.len());
        assert_eq!(
            result.data["A"]["Sector"],
            Some(MetricValue::Text("Technology".to_string()))
        );
    }

    #[tokio::test]
    async fn failed_ticker_is_all_null_and_others_survive() {
        // B has fundamentals but no quote, so one of its three fetches fails.
        let market = with_ticker(FixtureMarketData::new(), "A", 10.0)
            .with_fundamentals("B", json!({"metric": {"peTTM": 5.0}}));

        let result = compare_tickers(&market, METRICS, &tickers(&["A", "B"])).await;

        assert!(result.data["B"].values().all(Option::is_none));
        assert_eq!(result.data["B"].len(), METRICS.len());
        assert_eq!(
            result.data["A"]["P/E Ratio"],
            Some(MetricValue::Number(10.0))
        );
        assert_eq!(result.ranking["P/E Ratio"].best, "A");
    }

    #[tokio::test]
    async fn fetches_each_ticker_sequentially() {
        let market = with_ticker(with_ticker(FixtureMarketData::new(), "A", 1.0), "B", 2.0);
        compare_tickers(&market, METRICS, &tickers(&["B", "A"])).await;

        assert_eq!(
            market.calls(),
            vec![
                "fundamentals:B",
                "quote:B",
                "profile:B",
                "fundamentals:A",
                "quote:A",
                "profile:A",
            ]
        );
    }
}
