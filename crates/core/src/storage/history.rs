use crate::domain::records::{HistoryEntry, HistoryPage};
use anyhow::Context;
use sqlx::SqlitePool;

pub const PAGE_SIZE: i64 = 10;

/// Writes the day's score for a ticker, replacing any earlier score for the same day.
pub async fn upsert(pool: &SqlitePool, entry: &HistoryEntry) -> anyhow::Result<()> {
    let ticker = super::ticker_key(&entry.ticker)?;
    anyhow::ensure!(
        entry.score.is_finite(),
        "history score must be finite (got {})",
        entry.score
    );

    sqlx::query("INSERT OR REPLACE INTO history (ticker, score, timestamp) VALUES (?, ?, ?)")
        .bind(&ticker)
        .bind(entry.score)
        .bind(entry.date)
        .execute(pool)
        .await
        .with_context(|| format!("upsert history failed (ticker={ticker}, date={})", entry.date))?;

    tracing::debug!(%ticker, date = %entry.date, score = entry.score, "history upserted");
    Ok(())
}

/// Newest-first page of history. `page` is 1-indexed.
pub async fn list_page(pool: &SqlitePool, page: i64) -> anyhow::Result<HistoryPage> {
    anyhow::ensure!(page >= 1, "page must be >= 1 (got {page})");

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM history")
        .fetch_one(pool)
        .await
        .context("count history failed")?;

    let rows = sqlx::query_as::<_, (String, f64, chrono::NaiveDate)>(
        "SELECT ticker, score, timestamp FROM history \
         ORDER BY id DESC \
         LIMIT ? OFFSET ?",
    )
    .bind(PAGE_SIZE)
    .bind((page - 1).saturating_mul(PAGE_SIZE))
    .fetch_all(pool)
    .await
    .context("select history page failed")?;

    let history = rows
        .into_iter()
        .map(|(ticker, score, date)| HistoryEntry {
            ticker,
            score,
            date,
        })
        .collect();

    Ok(HistoryPage {
        history,
        total_pages: total_pages(total),
        current_page: page,
    })
}

fn total_pages(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}
