use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use tickerlens_core::domain::comparison::{ComparisonResult, METRICS};
use tickerlens_core::domain::normalize_ticker;
use tickerlens_core::domain::records::{HistoryPage, InsertOutcome, NewHolding, PortfolioHolding};
use tickerlens_core::flow;
use tickerlens_core::flow::news::NewsSentiment;
use tickerlens_core::market::types::Quote;
use tickerlens_core::market::MarketDataClient;
use tickerlens_core::storage;
use tickerlens_core::time::window::today;

#[derive(Clone)]
pub struct AppState {
    pub pool: Option<SqlitePool>,
    pub market: Option<Arc<dyn MarketDataClient>>,
}

impl AppState {
    fn pool(&self) -> Result<&SqlitePool, ApiError> {
        self.pool.as_ref().ok_or(ApiError::Unavailable("database"))
    }

    fn market(&self) -> Result<&dyn MarketDataClient, ApiError> {
        self.market
            .as_deref()
            .ok_or(ApiError::Unavailable("market data provider"))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/news", get(get_news))
        .route("/api/quote/:ticker", get(get_quote))
        .route("/api/compare", post(compare))
        .route("/api/wishlist", get(get_wishlist))
        .route("/api/wishlist/add", post(add_to_wishlist))
        .route("/api/wishlist/delete/:ticker", delete(delete_from_wishlist))
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/portfolio/add", post(add_to_portfolio))
        .route("/api/portfolio/delete/:ticker", delete(delete_from_portfolio))
        .route("/api/history", get(get_history))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

fn require_ticker(raw: Option<&str>, message: &str) -> Result<String, ApiError> {
    raw.and_then(normalize_ticker)
        .ok_or_else(|| ApiError::Validation(message.to_string()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(v)| v)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

#[derive(Debug, Deserialize)]
struct NewsQuery {
    ticker: Option<String>,
}

async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsSentiment>, ApiError> {
    let ticker = require_ticker(query.ticker.as_deref(), "Missing ticker parameter")?;
    let market = state.market()?;

    let out = flow::news::score_ticker_news(market, state.pool.as_ref(), &ticker, today())
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(out))
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    ticker: String,
    current_price: Option<f64>,
}

async fn get_quote(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let ticker = require_ticker(Some(ticker.as_str()), "Ticker is required")?;
    let market = state.market()?;

    let raw = market.quote(&ticker).await.map_err(ApiError::Upstream)?;
    let quote = serde_json::from_value::<Quote>(raw)
        .map_err(|e| ApiError::Upstream(anyhow::Error::new(e).context("malformed quote payload")))?;

    if quote.is_empty() {
        return Err(ApiError::NotFound(format!("No quote found for {ticker}")));
    }

    Ok(Json(QuoteResponse {
        ticker,
        current_price: quote.current_price,
    }))
}

#[derive(Debug, Deserialize)]
struct CompareRequest {
    #[serde(default)]
    tickers: Vec<String>,
}

async fn compare(
    State(state): State<AppState>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>, ApiError> {
    let req = json_body(body)?;
    let tickers = flow::compare::normalize_tickers(&req.tickers)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let market = state.market()?;

    Ok(Json(
        flow::compare::compare_tickers(market, METRICS, &tickers).await,
    ))
}

#[derive(Debug, Deserialize)]
struct TickerRequest {
    ticker: Option<String>,
}

async fn get_wishlist(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let items = storage::wishlist::list(state.pool()?).await?;
    let tickers: Vec<String> = items.into_iter().map(|i| i.ticker).collect();
    Ok(Json(json!({ "wishlist": tickers })))
}

async fn add_to_wishlist(
    State(state): State<AppState>,
    body: Result<Json<TickerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let req = json_body(body)?;
    let ticker = require_ticker(req.ticker.as_deref(), "Ticker is required")?;

    match storage::wishlist::add(state.pool()?, &ticker, today()).await? {
        InsertOutcome::Inserted => Ok((
            StatusCode::CREATED,
            Json(json!({ "message": format!("{ticker} added to wishlist") })),
        )),
        InsertOutcome::Conflict => Err(ApiError::Conflict(format!(
            "{ticker} is already in the wishlist"
        ))),
    }
}

async fn delete_from_wishlist(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let ticker = require_ticker(Some(ticker.as_str()), "Ticker is required")?;

    if storage::wishlist::remove(state.pool()?, &ticker).await? {
        Ok(Json(
            json!({ "message": format!("{ticker} removed from wishlist") }),
        ))
    } else {
        Err(ApiError::NotFound(format!("{ticker} is not in the wishlist")))
    }
}

#[derive(Debug, Deserialize)]
struct HoldingRequest {
    ticker: Option<String>,
    quantity: Option<f64>,
    purchase_price: Option<f64>,
    target_price: Option<f64>,
    stop_loss_price: Option<f64>,
}

impl HoldingRequest {
    fn into_new_holding(self) -> Result<NewHolding, ApiError> {
        let ticker = require_ticker(self.ticker.as_deref(), "Ticker is required")?;
        let (Some(quantity), Some(purchase_price)) = (self.quantity, self.purchase_price) else {
            return Err(ApiError::Validation(
                "quantity and purchase_price are required".to_string(),
            ));
        };

        let holding = NewHolding {
            ticker,
            quantity,
            purchase_price,
            target_price: self.target_price,
            stop_loss_price: self.stop_loss_price,
        };
        holding
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        Ok(holding)
    }
}

#[derive(Debug, Serialize)]
struct PortfolioResponse {
    portfolio: Vec<PortfolioHolding>,
}

async fn get_portfolio(State(state): State<AppState>) -> Result<Json<PortfolioResponse>, ApiError> {
    let portfolio = storage::portfolio::list(state.pool()?).await?;
    Ok(Json(PortfolioResponse { portfolio }))
}

async fn add_to_portfolio(
    State(state): State<AppState>,
    body: Result<Json<HoldingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new = json_body(body)?.into_new_holding()?;
    let pool = state.pool()?;

    let (outcome, holding) =
        flow::portfolio::add_holding(pool, state.market.as_deref(), new, today()).await?;

    match outcome {
        InsertOutcome::Inserted => Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": format!("{} added to portfolio", holding.ticker),
                "holding": holding,
            })),
        )),
        InsertOutcome::Conflict => Err(ApiError::Conflict(format!(
            "{} is already in the portfolio",
            holding.ticker
        ))),
    }
}

async fn delete_from_portfolio(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let ticker = require_ticker(Some(ticker.as_str()), "Ticker is required")?;

    if storage::portfolio::remove(state.pool()?, &ticker).await? {
        Ok(Json(
            json!({ "message": format!("{ticker} removed from portfolio") }),
        ))
    } else {
        Err(ApiError::NotFound(format!("{ticker} is not in the portfolio")))
    }
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    page: Option<String>,
}

async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryPage>, ApiError> {
    let page = match query.page.as_deref().map(str::trim) {
        None | Some("") => 1,
        Some(s) => s
            .parse::<i64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| ApiError::Validation(format!("page must be a positive integer (got {s})")))?,
    };

    Ok(Json(storage::history::list_page(state.pool()?, page).await?))
}
