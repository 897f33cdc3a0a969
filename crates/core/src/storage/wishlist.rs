use crate::domain::records::{InsertOutcome, WishlistItem};
use anyhow::Context;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub async fn add(
    pool: &SqlitePool,
    ticker: &str,
    added_on: NaiveDate,
) -> anyhow::Result<InsertOutcome> {
    let ticker = super::ticker_key(ticker)?;

    let res = sqlx::query(
        "INSERT INTO wishlist (ticker, timestamp) VALUES (?, ?) \
         ON CONFLICT (ticker) DO NOTHING",
    )
    .bind(&ticker)
    .bind(added_on)
    .execute(pool)
    .await
    .with_context(|| format!("insert wishlist failed (ticker={ticker})"))?;

    Ok(if res.rows_affected() == 0 {
        InsertOutcome::Conflict
    } else {
        InsertOutcome::Inserted
    })
}

/// Returns `false` when the ticker was not on the wishlist.
pub async fn remove(pool: &SqlitePool, ticker: &str) -> anyhow::Result<bool> {
    let ticker = super::ticker_key(ticker)?;

    let res = sqlx::query("DELETE FROM wishlist WHERE ticker = ?")
        .bind(&ticker)
        .execute(pool)
        .await
        .with_context(|| format!("delete wishlist failed (ticker={ticker})"))?;

    Ok(res.rows_affected() > 0)
}

pub async fn list(pool: &SqlitePool) -> anyhow::Result<Vec<WishlistItem>> {
    let rows = sqlx::query_as::<_, (String, NaiveDate)>(
        "SELECT ticker, timestamp FROM wishlist ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await
    .context("select wishlist failed")?;

    Ok(rows
        .into_iter()
        .map(|(ticker, added_on)| WishlistItem { ticker, added_on })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::connect_in_memory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 27).unwrap()
    }

    #[tokio::test]
    async fn duplicate_add_is_a_conflict_without_a_second_row() {
        let pool = connect_in_memory().await.unwrap();
        assert_eq!(
            add(&pool, "tsla", today()).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            add(&pool, "TSLA", today()).await.unwrap(),
            InsertOutcome::Conflict
        );

        let items = list(&pool).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ticker, "TSLA");
        assert_eq!(items[0].added_on, today());
    }

    #[tokio::test]
    async fn remove_reports_absent_tickers() {
        let pool = connect_in_memory().await.unwrap();
        add(&pool, "NVDA", today()).await.unwrap();

        assert!(remove(&pool, "nvda").await.unwrap());
        assert!(!remove(&pool, "NVDA").await.unwrap());
        assert!(list(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let pool = connect_in_memory().await.unwrap();
        for t in ["AAPL", "MSFT", "GOOG"] {
            add(&pool, t, today()).await.unwrap();
        }
        let tickers: Vec<_> = list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.ticker)
            .collect();
        assert_eq!(tickers, ["GOOG", "MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn blank_ticker_is_rejected() {
        let pool = connect_in_memory().await.unwrap();
        assert!(add(&pool, "  ", today()).await.is_err());
    }
}
