use crate::domain::records::{InsertOutcome, PortfolioHolding};
use anyhow::Context;
use chrono::NaiveDate;
use sqlx::SqlitePool;

type HoldingRow = (
    String,
    f64,
    f64,
    Option<f64>,
    Option<f64>,
    String,
    NaiveDate,
);

pub async fn add(pool: &SqlitePool, holding: &PortfolioHolding) -> anyhow::Result<InsertOutcome> {
    let ticker = super::ticker_key(&holding.ticker)?;

    let res = sqlx::query(
        "INSERT INTO portfolio \
         (ticker, quantity, purchase_price, target_price, stop_loss_price, sector, timestamp) \
         VALUES (?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT (ticker) DO NOTHING",
    )
    .bind(&ticker)
    .bind(holding.quantity)
    .bind(holding.purchase_price)
    .bind(holding.target_price)
    .bind(holding.stop_loss_price)
    .bind(&holding.sector)
    .bind(holding.added_on)
    .execute(pool)
    .await
    .with_context(|| format!("insert portfolio failed (ticker={ticker})"))?;

    Ok(if res.rows_affected() == 0 {
        InsertOutcome::Conflict
    } else {
        InsertOutcome::Inserted
    })
}

/// Returns `false` when no holding existed for the ticker.
pub async fn remove(pool: &SqlitePool, ticker: &str) -> anyhow::Result<bool> {
    let ticker = super::ticker_key(ticker)?;

    let res = sqlx::query("DELETE FROM portfolio WHERE ticker = ?")
        .bind(&ticker)
        .execute(pool)
        .await
        .with_context(|| format!("delete portfolio failed (ticker={ticker})"))?;

    Ok(res.rows_affected() > 0)
}

pub async fn list(pool: &SqlitePool) -> anyhow::Result<Vec<PortfolioHolding>> {
    let rows = sqlx::query_as::<_, HoldingRow>(
        "SELECT ticker, quantity, purchase_price, target_price, stop_loss_price, sector, timestamp \
         FROM portfolio \
         ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await
    .context("select portfolio failed")?;

    Ok(rows
        .into_iter()
        .map(
            |(ticker, quantity, purchase_price, target_price, stop_loss_price, sector, added_on)| {
                PortfolioHolding {
                    ticker,
                    quantity,
                    purchase_price,
                    target_price,
                    stop_loss_price,
                    sector,
                    added_on,
                }
            },
        )
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::connect_in_memory;

    fn holding(ticker: &str) -> PortfolioHolding {
        PortfolioHolding {
            ticker: ticker.to_string(),
            quantity: 5.0,
            purchase_price: 412.5,
            target_price: Some(500.0),
            stop_loss_price: None,
            sector: "Technology".to_string(),
            added_on: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
        }
    }

    #[tokio::test]
    async fn round_trips_optional_prices_and_uppercases() {
        let pool = connect_in_memory().await.unwrap();
        assert_eq!(
            add(&pool, &holding("msft")).await.unwrap(),
            InsertOutcome::Inserted
        );

        let listed = list(&pool).await.unwrap();
        assert_eq!(listed, vec![holding("MSFT")]);
    }

    #[tokio::test]
    async fn duplicate_is_conflict_and_remove_reports_absence() {
        let pool = connect_in_memory().await.unwrap();
        add(&pool, &holding("MSFT")).await.unwrap();
        assert_eq!(
            add(&pool, &holding("MSFT")).await.unwrap(),
            InsertOutcome::Conflict
        );
        assert_eq!(list(&pool).await.unwrap().len(), 1);

        assert!(remove(&pool, "msft").await.unwrap());
        assert!(!remove(&pool, "MSFT").await.unwrap());
    }
}
