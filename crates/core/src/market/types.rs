use serde::{Deserialize, Serialize};

/// One item of the provider's company-news feed. Missing fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    /// Unix seconds.
    #[serde(default)]
    pub datetime: i64,
}

/// Subset of the provider's quote payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "c", default)]
    pub current_price: Option<f64>,
    #[serde(rename = "pc", default)]
    pub previous_close: Option<f64>,
    #[serde(rename = "t", default)]
    pub timestamp: Option<i64>,
}

impl Quote {
    /// The provider answers unknown symbols with an all-zero quote rather than an error.
    pub fn is_empty(&self) -> bool {
        let zero = |v: Option<f64>| v.map_or(true, |x| x == 0.0);
        zero(self.current_price) && zero(self.previous_close) && self.timestamp.unwrap_or(0) == 0
    }
}

/// Subset of the provider's company profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "finnhubIndustry", default)]
    pub industry: Option<String>,
}
