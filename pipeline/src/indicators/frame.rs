//! Indicator engine: a [`Series`] extended with aligned derived columns

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{PricePoint, Series};
use crate::error::PipelineError;
use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic,
};

/// Periods used by the indicator engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSettings {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub stoch_period: usize,
    pub stoch_smooth: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
            stoch_period: 14,
            stoch_smooth: 3,
        }
    }
}

/// Derived column, aligned index-for-index with the series
pub type Column = Vec<Option<f64>>;

/// Series plus technical indicator columns.
///
/// `None` marks positions without enough history; it is never a stand-in
/// for zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndicatorFrame {
    pub series: Series,
    pub settings: IndicatorSettings,
    pub sma: Column,
    pub ema: Column,
    pub rsi: Column,
    pub macd: Column,
    pub macd_signal: Column,
    pub macd_histogram: Column,
    pub bb_upper: Column,
    pub bb_middle: Column,
    pub bb_lower: Column,
    pub stoch_k: Column,
    pub stoch_d: Column,
}

/// One frame position flattened for tabular consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRow {
    #[serde(flatten)]
    pub point: PricePoint,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
}

impl IndicatorFrame {
    /// Compute every indicator over `series`.
    ///
    /// Fails only when `settings` holds an unusable period.
    pub fn compute(series: &Series, settings: &IndicatorSettings) -> Result<Self, PipelineError> {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();

        let macd = calculate_macd(
            &closes,
            settings.macd_fast,
            settings.macd_slow,
            settings.macd_signal,
        )?;
        let bands = calculate_bollinger(&closes, settings.bb_period, settings.bb_std_dev)?;
        let stoch = calculate_stochastic(
            &highs,
            &lows,
            &closes,
            settings.stoch_period,
            settings.stoch_smooth,
        )?;

        let frame = Self {
            series: series.clone(),
            settings: *settings,
            sma: calculate_sma(&closes, settings.sma_period)?,
            ema: calculate_ema(&closes, settings.ema_period)?,
            rsi: calculate_rsi(&closes, settings.rsi_period)?,
            macd: macd.iter().map(|m| m.macd).collect(),
            macd_signal: macd.iter().map(|m| m.signal).collect(),
            macd_histogram: macd.iter().map(|m| m.histogram).collect(),
            bb_upper: bands.iter().map(|b| b.map(|b| b.upper)).collect(),
            bb_middle: bands.iter().map(|b| b.map(|b| b.middle)).collect(),
            bb_lower: bands.iter().map(|b| b.map(|b| b.lower)).collect(),
            stoch_k: stoch.iter().map(|s| s.k).collect(),
            stoch_d: stoch.iter().map(|s| s.d).collect(),
        };

        debug!(points = frame.len(), "Computed indicator frame");
        Ok(frame)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Flattened row at `index`
    pub fn row(&self, index: usize) -> Option<FrameRow> {
        let point = self.series.get(index)?.clone();
        Some(FrameRow {
            point,
            sma: self.sma[index],
            ema: self.ema[index],
            rsi: self.rsi[index],
            macd: self.macd[index],
            macd_signal: self.macd_signal[index],
            macd_histogram: self.macd_histogram[index],
            bb_upper: self.bb_upper[index],
            bb_middle: self.bb_middle[index],
            bb_lower: self.bb_lower[index],
            stoch_k: self.stoch_k[index],
            stoch_d: self.stoch_d[index],
        })
    }

    /// All rows, oldest first
    pub fn rows(&self) -> Vec<FrameRow> {
        (0..self.len()).filter_map(|i| self.row(i)).collect()
    }
}
