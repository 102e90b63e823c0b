use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use stockdash_pipeline::prelude::{
    normalize, ChartType, Dashboard, DashboardRequest, IndicatorKind, QuoteCard, Ticker, TimeWindow,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Window used for the watchlist quote strip
const QUOTE_WINDOW: TimeWindow = TimeWindow::FiveDays;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/quotes", get(quotes))
        .route("/api/dashboard", get(dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": env!("GIT_HASH"),
        "build_time": env!("BUILD_TIME"),
    }))
}

#[derive(Debug, Serialize)]
pub struct QuotesResponse {
    pub window: TimeWindow,
    pub quotes: Vec<QuoteCard>,
    pub warnings: Vec<String>,
}

async fn quotes(State(state): State<Arc<AppState>>) -> Json<QuotesResponse> {
    let now = Utc::now();
    let mut quotes = Vec::with_capacity(state.watchlist.len());
    let mut warnings = Vec::new();

    for symbol in &state.watchlist {
        let ticker = match Ticker::parse(symbol) {
            Ok(ticker) => ticker,
            Err(e) => {
                warn!(%symbol, error = %e, "Skipping watchlist entry");
                warnings.push(e.to_string());
                continue;
            }
        };

        let (rows, warning) = state.load_rows(&ticker).await;
        warnings.extend(warning);

        let series = QUOTE_WINDOW.select(&normalize(&rows).series, now);
        match QuoteCard::from_series(ticker.symbol(), &series) {
            Some(card) => quotes.push(card),
            None if rows.is_empty() => {}
            None => warnings.push(format!("No recent prices for {}", ticker)),
        }
    }

    Json(QuotesResponse {
        window: QUOTE_WINDOW,
        quotes,
        warnings,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub ticker: Option<String>,
    pub period: Option<String>,
    pub chart: Option<String>,
    pub indicators: Option<String>,
}

impl DashboardQuery {
    /// Validate the query into an immutable pipeline request
    pub fn into_request(self, default_ticker: &str) -> Result<DashboardRequest, ApiError> {
        let ticker = Ticker::parse(self.ticker.as_deref().unwrap_or(default_ticker))?;
        let window = match self.period.as_deref() {
            Some(period) => period.parse()?,
            None => TimeWindow::default(),
        };
        let chart_type = match self.chart.as_deref() {
            Some(chart) => chart.parse()?,
            None => ChartType::default(),
        };
        let indicators = match self.indicators.as_deref() {
            Some(list) => IndicatorKind::parse_list(list)?,
            None => Vec::new(),
        };

        Ok(DashboardRequest::new(ticker, window)
            .with_chart_type(chart_type)
            .with_indicators(indicators))
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    pub warnings: Vec<String>,
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let request = query.into_request(&state.default_ticker)?;

    let (rows, warning) = state.load_rows(&request.ticker).await;
    let fetch_failed = warning.is_some();
    let mut warnings: Vec<String> = warning.into_iter().collect();

    let dashboard = Dashboard::build(&rows, &request, Utc::now())?;
    if dashboard.is_empty() && !fetch_failed {
        warnings.push(format!("No data to display for {} ({})", request.ticker, request.window));
    }
    if !dashboard.rejected_rows.is_empty() {
        warnings.push(format!("{} malformed rows were skipped", dashboard.rejected_rows.len()));
    }

    Ok(Json(DashboardResponse { dashboard, warnings }))
}
