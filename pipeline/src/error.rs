//! Pipeline error types

use thiserror::Error;

/// Errors raised while building a dashboard request or configuring indicators.
///
/// Data problems (empty series, short history, zero base price) are not
/// errors: every stage degrades to its empty-input behaviour instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("unknown time window: {0:?} (expected 5d, 1mo, 3mo, 6mo, 1y or max)")]
    UnknownWindow(String),

    #[error("unknown chart type: {0:?} (expected candlestick or line)")]
    UnknownChartType(String),

    #[error("unknown indicator: {0:?}")]
    UnknownIndicator(String),

    #[error("invalid parameter for {indicator}: {reason}")]
    InvalidParameter {
        indicator: &'static str,
        reason: String,
    },
}

impl PipelineError {
    pub(crate) fn invalid_period(indicator: &'static str, period: usize) -> Self {
        Self::InvalidParameter {
            indicator,
            reason: format!("period must be greater than zero, got {}", period),
        }
    }
}
