//! One full pass of the pipeline for a dashboard request

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::chart::{history_table, indicator_table, ChartSpec, ChartType, HistoryRow, IndicatorRow};
use crate::data::{normalize, RawRow, RowRejection, TimeWindow};
use crate::error::PipelineError;
use crate::indicators::{FrameRow, IndicatorFrame, IndicatorKind, IndicatorSettings};
use crate::metrics::{MetricCard, MetricsSummary};
use crate::ticker::Ticker;

/// Immutable description of what the user asked for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRequest {
    pub ticker: Ticker,
    pub window: TimeWindow,
    pub chart_type: ChartType,
    pub indicators: Vec<IndicatorKind>,
    pub settings: IndicatorSettings,
}

impl DashboardRequest {
    pub fn new(ticker: Ticker, window: TimeWindow) -> Self {
        Self {
            ticker,
            window,
            chart_type: ChartType::default(),
            indicators: Vec::new(),
            settings: IndicatorSettings::default(),
        }
    }

    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    pub fn with_indicators(mut self, indicators: Vec<IndicatorKind>) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_settings(mut self, settings: IndicatorSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Everything the rendering layer needs for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub ticker: Ticker,
    pub window: TimeWindow,
    pub metrics: MetricsSummary,
    pub cards: Vec<MetricCard>,
    pub chart: ChartSpec,
    pub frame: Vec<FrameRow>,
    pub history: Vec<HistoryRow>,
    pub indicators: Vec<IndicatorRow>,
    pub rejected_rows: Vec<RowRejection>,
}

impl Dashboard {
    /// Normalize, window, compute indicators, then summarize.
    ///
    /// No rows (an unavailable source) produce an empty dashboard with zero
    /// metrics. The only error is an invalid indicator configuration.
    pub fn build(
        rows: &[RawRow],
        request: &DashboardRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, PipelineError> {
        let normalized = normalize(rows);
        let windowed = request.window.select(&normalized.series, now);
        let frame = IndicatorFrame::compute(&windowed, &request.settings)?;
        let metrics = MetricsSummary::from_series(&frame.series);

        info!(
            ticker = %request.ticker,
            window = %request.window,
            points = frame.len(),
            "Built dashboard"
        );

        Ok(Self {
            ticker: request.ticker.clone(),
            window: request.window,
            metrics,
            cards: metrics.cards(request.ticker.as_str()),
            chart: ChartSpec::build(
                &request.ticker,
                request.window,
                request.chart_type,
                &request.indicators,
            ),
            frame: frame.rows(),
            history: history_table(&frame),
            indicators: indicator_table(&frame),
            rejected_rows: normalized.rejected,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }
}
