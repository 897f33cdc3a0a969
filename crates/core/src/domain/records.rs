use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ticker: String,
    pub score: f64,
    #[serde(rename = "timestamp")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub history: Vec<HistoryEntry>,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub ticker: String,
    pub added_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    pub ticker: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub target_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
    pub sector: String,
    pub added_on: NaiveDate,
}

/// A holding as submitted by the user, before the sector lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHolding {
    pub ticker: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub target_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
}

impl NewHolding {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.ticker.trim().is_empty(), "ticker must be non-empty");
        anyhow::ensure!(
            self.quantity.is_finite() && self.quantity > 0.0,
            "quantity must be a positive number (got {})",
            self.quantity
        );
        anyhow::ensure!(
            self.purchase_price.is_finite() && self.purchase_price > 0.0,
            "purchase_price must be a positive number (got {})",
            self.purchase_price
        );
        for (name, value) in [
            ("target_price", self.target_price),
            ("stop_loss_price", self.stop_loss_price),
        ] {
            if let Some(v) = value {
                anyhow::ensure!(
                    v.is_finite() && v >= 0.0,
                    "{name} must be a non-negative number (got {v})"
                );
            }
        }
        Ok(())
    }
}

/// Outcome of inserting into a ticker-unique table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Conflict,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding() -> NewHolding {
        NewHolding {
            ticker: "AAPL".to_string(),
            quantity: 10.0,
            purchase_price: 150.0,
            target_price: Some(200.0),
            stop_loss_price: None,
        }
    }

    #[test]
    fn accepts_positive_holding() {
        assert!(holding().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_quantity_and_price() {
        let mut h = holding();
        h.quantity = 0.0;
        assert!(h.validate().is_err());

        let mut h = holding();
        h.purchase_price = -1.0;
        assert!(h.validate().is_err());

        let mut h = holding();
        h.stop_loss_price = Some(f64::NAN);
        assert!(h.validate().is_err());
    }

    #[test]
    fn history_entry_serializes_date_as_timestamp() {
        let entry = HistoryEntry {
            ticker: "AAPL".to_string(),
            score: 0.25,
            date: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["timestamp"], "2026-01-27");
        assert_eq!(v["ticker"], "AAPL");
    }
}
