//! Declarative metric table plus the extraction and ranking applied to it.
//!
//! Adding a metric means adding a row to [`METRICS`]; the comparison flow never names a metric.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Quote,
    Fundamentals,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    Field(&'static str),
    /// `numerator / denominator`, null unless both are numeric and the denominator is non-zero.
    Quotient {
        numerator: &'static str,
        denominator: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDef {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub source: MetricSource,
    pub direction: Option<Direction>,
}

const fn field(
    name: &'static str,
    endpoint: Endpoint,
    key: &'static str,
    direction: Option<Direction>,
) -> MetricDef {
    MetricDef {
        name,
        endpoint,
        source: MetricSource::Field(key),
        direction,
    }
}

use Direction::{HigherIsBetter, LowerIsBetter};
use Endpoint::{Fundamentals, Profile, Quote};

pub const METRICS: &[MetricDef] = &[
    field("Current Price", Quote, "c", None),
    field("Sector", Profile, "finnhubIndustry", None),
    field("Market Cap (M)", Profile, "marketCapitalization", Some(HigherIsBetter)),
    field("P/E Ratio", Fundamentals, "peTTM", Some(LowerIsBetter)),
    field("P/B Ratio", Fundamentals, "pbQuarterly", Some(LowerIsBetter)),
    field("EPS (TTM)", Fundamentals, "epsTTM", Some(HigherIsBetter)),
    field(
        "Dividend Yield (%)",
        Fundamentals,
        "dividendYieldIndicatedAnnual",
        Some(HigherIsBetter),
    ),
    field("ROE (%)", Fundamentals, "roeTTM", Some(HigherIsBetter)),
    field(
        "Net Profit Margin (%)",
        Fundamentals,
        "netProfitMarginTTM",
        Some(HigherIsBetter),
    ),
    field(
        "Revenue Growth (%)",
        Fundamentals,
        "revenueGrowthTTMYoy",
        Some(HigherIsBetter),
    ),
    field("Beta", Fundamentals, "beta", Some(LowerIsBetter)),
    field("52 Week High", Fundamentals, "52WeekHigh", None),
    field("52 Week Low", Fundamentals, "52WeekLow", None),
    MetricDef {
        name: "Debt/Equity",
        endpoint: Fundamentals,
        source: MetricSource::Quotient {
            numerator: "totalDebt",
            denominator: "totalEquity",
        },
        direction: Some(LowerIsBetter),
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

/// Metric name to value for one ticker. `None` serializes as `null`.
pub type MetricRow = BTreeMap<String, Option<MetricValue>>;

/// Raw provider payloads for one ticker.
#[derive(Debug, Clone, Default)]
pub struct EndpointPayloads {
    pub quote: Value,
    pub fundamentals: Value,
    pub profile: Value,
}

impl EndpointPayloads {
    fn fields(&self, endpoint: Endpoint) -> Option<&Map<String, Value>> {
        match endpoint {
            Endpoint::Quote => self.quote.as_object(),
            Endpoint::Profile => self.profile.as_object(),
            // /stock/metric nests the figures under "metric".
            Endpoint::Fundamentals => self.fundamentals.get("metric")?.as_object(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremes {
    pub best: String,
    pub worst: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metrics: Vec<String>,
    pub data: BTreeMap<String, MetricRow>,
    pub ranking: BTreeMap<String, Extremes>,
}

pub fn metric_names(defs: &[MetricDef]) -> Vec<String> {
    defs.iter().map(|d| d.name.to_string()).collect()
}

pub fn extract_metrics(defs: &[MetricDef], payloads: &EndpointPayloads) -> MetricRow {
    defs.iter()
        .map(|def| {
            let value = payloads
                .fields(def.endpoint)
                .and_then(|fields| resolve(def.source, fields));
            (def.name.to_string(), value)
        })
        .collect()
}

/// Row used when any fetch for a ticker failed.
pub fn unavailable_row(defs: &[MetricDef]) -> MetricRow {
    defs.iter().map(|def| (def.name.to_string(), None)).collect()
}

fn resolve(source: MetricSource, fields: &Map<String, Value>) -> Option<MetricValue> {
    match source {
        MetricSource::Field(key) => match fields.get(key)? {
            Value::Number(n) => n.as_f64().and_then(rounded),
            Value::String(s) if !s.trim().is_empty() => Some(MetricValue::Text(s.clone())),
            _ => None,
        },
        MetricSource::Quotient {
            numerator,
            denominator,
        } => {
            let num = fields.get(numerator)?.as_f64()?;
            let den = fields.get(denominator)?.as_f64()?;
            if den == 0.0 {
                return None;
            }
            rounded(num / den)
        }
    }
}

fn rounded(v: f64) -> Option<MetricValue> {
    if !v.is_finite() {
        return None;
    }
    Some(MetricValue::Number(round2(v)))
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Best and worst ticker for every directed metric.
///
/// Values are stable-sorted best first, so among tied values the earlier ticker in `tickers` is
/// best and the later one is worst. Tickers without a
/// numeric value are skipped; a metric nobody has a value for is left out.
pub fn rank(
    defs: &[MetricDef],
    tickers: &[String],
    data: &BTreeMap<String, MetricRow>,
) -> BTreeMap<String, Extremes> {
    let mut ranking = BTreeMap::new();

    for def in defs {
        let Some(direction) = def.direction else {
            continue;
        };

        let mut values: Vec<(&str, f64)> = tickers
            .iter()
            .filter_map(|ticker| {
                let value = data.get(ticker)?.get(def.name)?.as_ref()?.as_number()?;
                Some((ticker.as_str(), value))
            })
            .collect();
        values.sort_by(|a, b| match direction {
            Direction::LowerIsBetter => a.1.total_cmp(&b.1),
            Direction::HigherIsBetter => b.1.total_cmp(&a.1),
        });

        let (Some(best), Some(worst)) = (values.first(), values.last()) else {
            continue;
        };

        ranking.insert(
            def.name.to_string(),
            Extremes {
                best: best.0.to_string(),
                worst: worst.0.to_string(),
            },
        );
    }

    ranking
}
