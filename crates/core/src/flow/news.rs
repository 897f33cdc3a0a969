use crate::domain::normalize_ticker;
use crate::domain::records::HistoryEntry;
use crate::market::MarketDataClient;
use crate::sentiment::polarity;
use crate::storage;
use crate::time::window::{trailing_window, NEWS_WINDOW_DAYS};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Articles returned to the caller. All scored articles count towards the overall score.
pub const MAX_ARTICLES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub headline: String,
    pub summary: String,
    pub sentiment_score: f64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSentiment {
    pub news: Vec<ScoredArticle>,
    pub overall_score: f64,
}

/// Scores the trailing week of news for `ticker` and records the mean as today's history entry.
///
/// Nothing is written when the fetch fails or no article has text. A failed history write is
/// logged and does not fail the call. Without a `pool` (dry runs, degraded API) scoring still
/// happens and nothing is stored.
pub async fn score_ticker_news(
    market: &dyn MarketDataClient,
    pool: Option<&SqlitePool>,
    ticker: &str,
    today: NaiveDate,
) -> anyhow::Result<NewsSentiment> {
    let ticker = normalize_ticker(ticker).context("ticker must be non-empty")?;
    let window = trailing_window(today, NEWS_WINDOW_DAYS);

    let articles = market
        .company_news(&ticker, window)
        .await
        .with_context(|| format!("news fetch failed for {ticker}"))?;

    let mut scored = Vec::new();
    let mut total = 0.0;
    for article in articles {
        let text = format!("{} {}", article.headline, article.summary);
        if text.trim().is_empty() {
            continue;
        }
        let score = polarity(&text);
        total += score;
        scored.push(ScoredArticle {
            headline: article.headline,
            summary: article.summary,
            sentiment_score: score,
            url: article.url,
        });
    }

    let overall_score = if scored.is_empty() {
        0.0
    } else {
        total / scored.len() as f64
    };

    tracing::info!(
        %ticker,
        provider = market.provider_name(),
        scored = scored.len(),
        overall_score,
        "news sentiment computed"
    );

    if !scored.is_empty() {
        match pool {
            Some(pool) => {
                let entry = HistoryEntry {
                    ticker: ticker.clone(),
                    score: overall_score,
                    date: today,
                };
                if let Err(err) = storage::history::upsert(pool, &entry).await {
                    tracing::warn!(%ticker, error = %err, "history update failed");
                }
            }
            None => tracing::debug!(%ticker, "no database supplied; history not recorded"),
        }
    }

    scored.truncate(MAX_ARTICLES);
    Ok(NewsSentiment {
        news: scored,
        overall_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::fixture::FixtureMarketData;
    use crate::market::types::NewsArticle;
    use crate::storage::connect_in_memory;

    fn article(headline: &str, summary: &str) -> NewsArticle {
        NewsArticle {
            headline: headline.to_string(),
            summary: summary.to_string(),
            url: format!("https://news.example/{}", headline.len()),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 27).unwrap()
    }

    async fn history_rows(pool: &SqlitePool) -> Vec<(String, f64)> {
        sqlx::query_as::<_, (String, f64)>("SELECT ticker, score FROM history ORDER BY id")
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn averages_scored_articles_and_records_history() {
        let pool = connect_in_memory().await.unwrap();
        let market = FixtureMarketData::new().with_news(
            "AAPL",
            vec![
                article("Apple shares surge", "Strong quarter"),
                article("", "   "),
                article("Apple faces lawsuit", ""),
            ],
        );

        let out = score_ticker_news(&market, Some(&pool), "aapl", today())
            .await
            .unwrap();

        assert_eq!(out.news.len(), 2);
        let expected = (out.news[0].sentiment_score + out.news[1].sentiment_score) / 2.0;
        assert!((out.overall_score - expected).abs() < 1e-12);
        assert_eq!(market.calls(), vec!["news:AAPL".to_string()]);

        let rows = history_rows(&pool).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "AAPL");
        assert!((rows[0].1 - out.overall_score).abs() < 1e-12);
    }

    #[tokio::test]
    async fn no_text_means_neutral_and_leaves_history_alone() {
        let pool = connect_in_memory().await.unwrap();
        storage::history::upsert(
            &pool,
            &HistoryEntry {
                ticker: "AAPL".to_string(),
                score: 0.42,
                date: today(),
            },
        )
        .await
        .unwrap();
        let market = FixtureMarketData::new().with_news("AAPL", vec![article(" ", "")]);

        let out = score_ticker_news(&market, Some(&pool), "AAPL", today())
            .await
            .unwrap();
        assert!(out.news.is_empty());
        assert_eq!(out.overall_score, 0.0);
        assert_eq!(history_rows(&pool).await, vec![("AAPL".to_string(), 0.42)]);
    }

    #[tokio::test]
    async fn second_run_same_day_replaces_score() {
        let pool = connect_in_memory().await.unwrap();
        let first = FixtureMarketData::new().with_news("AAPL", vec![article("great results", "")]);
        let second = FixtureMarketData::new().with_news("AAPL", vec![article("terrible results", "")]);

        score_ticker_news(&first, Some(&pool), "AAPL", today())
            .await
            .unwrap();
        let out = score_ticker_news(&second, Some(&pool), "AAPL", today())
            .await
            .unwrap();

        let rows = history_rows(&pool).await;
        assert_eq!(rows.len(), 1);
        assert!((rows[0].1 - out.overall_score).abs() < 1e-12);
        assert!(rows[0].1 < 0.0);
    }

    #[tokio::test]
    async fn returns_at_most_ten_articles_but_averages_all() {
        let pool = connect_in_memory().await.unwrap();
        let mut articles: Vec<_> = (0..10).map(|_| article("good", "")).collect();
        articles.extend((0..5).map(|_| article("bad", "")));
        let market = FixtureMarketData::new().with_news("MSFT", articles);

        let out = score_ticker_news(&market, Some(&pool), "MSFT", today())
            .await
            .unwrap();
        assert_eq!(out.news.len(), MAX_ARTICLES);
        let expected = (10.0 * polarity("good") + 5.0 * polarity("bad")) / 15.0;
        assert!((out.overall_score - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn fetch_failure_is_an_error_and_writes_nothing() {
        let pool = connect_in_memory().await.unwrap();
        let market = FixtureMarketData::new();

        let err = score_ticker_news(&market, Some(&pool), "ZZZZ", today())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("ZZZZ"));
        assert!(history_rows(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn scores_the_same_without_a_database() {
        let articles = vec![article("good", ""), article("bad news", "weak demand")];
        let market = FixtureMarketData::new().with_news("AAPL", articles);
        let pool = connect_in_memory().await.unwrap();

        let dry = score_ticker_news(&market, None, "AAPL", today())
            .await
            .unwrap();
        let stored = score_ticker_news(&market, Some(&pool), "AAPL", today())
            .await
            .unwrap();

        assert_eq!(dry, stored);
        assert_eq!(history_rows(&pool).await.len(), 1);
    }
}
