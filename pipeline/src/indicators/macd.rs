//! MACD (Moving Average Convergence Divergence) indicator

use crate::error::PipelineError;
use crate::indicators::{Indicator, EMA};
use serde::Serialize;

/// MACD indicator built from three EMAs.
///
/// The signal EMA only receives MACD values once both the fast and the slow
/// EMA are defined.
#[derive(Debug, Clone)]
pub struct MACD {
    fast: EMA,
    slow: EMA,
    signal: EMA,
    last_output: Option<MACDResult>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            fast: EMA::new(fast_period)?,
            slow: EMA::new(slow_period)?,
            signal: EMA::new(signal_period)?,
            last_output: None,
        })
    }

    /// Get MACD line value
    pub fn macd(&self) -> Option<f64> {
        self.last_output.as_ref().and_then(|o| o.macd)
    }

    /// Get signal line value
    pub fn signal(&self) -> Option<f64> {
        self.last_output.as_ref().and_then(|o| o.signal)
    }

    /// Get histogram value (MACD - Signal)
    pub fn histogram(&self) -> Option<f64> {
        self.last_output.as_ref().and_then(|o| o.histogram)
    }

    /// Latest output, `None` until the slow EMA is defined
    pub fn output(&self) -> Option<MACDResult> {
        self.last_output
    }
}

impl Indicator for MACD {
    fn name(&self) -> &str {
        "MACD"
    }

    fn update(&mut self, value: f64) {
        self.fast.update(value);
        self.slow.update(value);

        let (Some(fast), Some(slow)) = (self.fast.value(), self.slow.value()) else {
            return;
        };

        let macd = fast - slow;
        self.signal.update(macd);
        let signal = self.signal.value();

        self.last_output = Some(MACDResult {
            macd: Some(macd),
            signal,
            histogram: signal.map(|s| macd - s),
        });
    }

    fn value(&self) -> Option<f64> {
        self.macd()
    }

    fn is_ready(&self) -> bool {
        self.signal().is_some()
    }
}

/// MACD result structure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MACDResult {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Calculate MACD line, signal and histogram columns
pub fn calculate_macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<Vec<MACDResult>, PipelineError> {
    let mut macd = MACD::new(fast_period, slow_period, signal_period)?;
    Ok(values
        .iter()
        .map(|&value| {
            macd.update(value);
            macd.output().unwrap_or_default()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::calculate_ema;

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1).collect()
    }

    #[test]
    fn test_macd_definition_boundaries() {
        let closes = wave(60);
        let out = calculate_macd(&closes, 12, 26, 9).unwrap();

        assert!(out[..25].iter().all(|o| o.macd.is_none()));
        assert!(out[25].macd.is_some());
        assert!(out[32].signal.is_none());
        assert!(out[33].signal.is_some());
        assert!(out[33].histogram.is_some());
    }

    #[test]
    fn test_macd_line_is_ema_difference() {
        let closes = wave(60);
        let out = calculate_macd(&closes, 12, 26, 9).unwrap();
        let fast = calculate_ema(&closes, 12).unwrap();
        let slow = calculate_ema(&closes, 26).unwrap();

        for i in 0..closes.len() {
            if let (Some(f), Some(s)) = (fast[i], slow[i]) {
                assert!((out[i].macd.unwrap() - (f - s)).abs() < 1e-12);
            }
        }
    }
}
