//! Newest-first tables of prices and indicator values

use serde::Serialize;

use crate::indicators::IndicatorFrame;

/// Date label format used by the tables (`dd/mm/YYYY`)
pub const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub date: String,
    /// Trading day timestamp projected onto the exchange timezone (RFC 3339)
    pub exchange_time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub date: String,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
}

/// OHLCV rows, most recent first
pub fn history_table(frame: &IndicatorFrame) -> Vec<HistoryRow> {
    frame
        .series
        .iter()
        .rev()
        .map(|p| HistoryRow {
            date: p.date.format(DATE_LABEL_FORMAT).to_string(),
            exchange_time: p.exchange_time().to_rfc3339(),
            open: p.open,
            high: p.high,
            low: p.low,
            close: p.close,
            volume: p.volume,
        })
        .collect()
}

/// Indicator rows, most recent first
pub fn indicator_table(frame: &IndicatorFrame) -> Vec<IndicatorRow> {
    (0..frame.len())
        .rev()
        .filter_map(|i| frame.row(i))
        .map(|row| IndicatorRow {
            date: row.point.date.format(DATE_LABEL_FORMAT).to_string(),
            sma: row.sma,
            ema: row.ema,
            rsi: row.rsi,
            macd: row.macd,
            macd_signal: row.macd_signal,
            bb_upper: row.bb_upper,
            bb_lower: row.bb_lower,
            stoch_k: row.stoch_k,
            stoch_d: row.stoch_d,
        })
        .collect()
}
