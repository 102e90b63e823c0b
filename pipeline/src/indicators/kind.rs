//! Indicator selection keys

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Indicators a caller can ask to have charted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    Bollinger,
    Stochastic,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 6] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
        IndicatorKind::Stochastic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::Bollinger => "bollinger",
            Self::Stochastic => "stochastic",
        }
    }

    /// Label shown in the indicator picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sma => "SMA 20",
            Self::Ema => "EMA 20",
            Self::Rsi => "RSI 14",
            Self::Macd => "MACD",
            Self::Bollinger => "Bollinger Bands",
            Self::Stochastic => "Stochastic Oscillator",
        }
    }

    /// Whether the indicator is drawn on top of the price chart
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Sma | Self::Ema | Self::Bollinger)
    }

    /// Parse a comma separated list, dropping duplicates and keeping a stable order
    pub fn parse_list(input: &str) -> Result<Vec<IndicatorKind>, PipelineError> {
        let mut kinds = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<IndicatorKind>, _>>()?;
        kinds.sort();
        kinds.dedup();
        Ok(kinds)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IndicatorKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.key().eq_ignore_ascii_case(wanted) || kind.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| PipelineError::UnknownIndicator(s.to_string()))
    }
}
