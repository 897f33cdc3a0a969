use crate::domain::records::{InsertOutcome, NewHolding, PortfolioHolding};
use crate::market::types::CompanyProfile;
use crate::market::MarketDataClient;
use crate::storage;
use anyhow::Context;
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Sector stored when the profile lookup fails or names no industry.
pub const UNKNOWN_SECTOR: &str = "N/A";

pub async fn lookup_sector(market: Option<&dyn MarketDataClient>, ticker: &str) -> String {
    let Some(market) = market else {
        return UNKNOWN_SECTOR.to_string();
    };

    let profile = match market.profile(ticker).await {
        Ok(raw) => serde_json::from_value::<CompanyProfile>(raw)
            .context("failed to parse company profile"),
        Err(err) => Err(err),
    };

    match profile {
        Ok(profile) => profile
            .industry
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
        Err(err) => {
            tracing::warn!(%ticker, error = %format!("{err:#}"), "sector lookup failed");
            UNKNOWN_SECTOR.to_string()
        }
    }
}

/// Validates the holding, looks up its sector and stores it.
pub async fn add_holding(
    pool: &SqlitePool,
    market: Option<&dyn MarketDataClient>,
    new: NewHolding,
    today: NaiveDate,
) -> anyhow::Result<(InsertOutcome, PortfolioHolding)> {
    new.validate()?;
    let ticker =
        crate::domain::normalize_ticker(&new.ticker).context("ticker must be non-empty")?;

    let sector = lookup_sector(market, &ticker).await;
    let holding = PortfolioHolding {
        ticker,
        quantity: new.quantity,
        purchase_price: new.purchase_price,
        target_price: new.target_price,
        stop_loss_price: new.stop_loss_price,
        sector,
        added_on: today,
    };

    let outcome = storage::portfolio::add(pool, &holding).await?;
    tracing::info!(ticker = %holding.ticker, sector = %holding.sector, ?outcome, "portfolio add");
    Ok((outcome, holding))
}
