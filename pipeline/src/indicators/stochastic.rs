//! Stochastic Oscillator (%K / %D)

use std::collections::VecDeque;

use crate::error::PipelineError;
use serde::Serialize;
use ta::indicators::{Maximum, Minimum};
use ta::Next;

/// Stochastic oscillator over high/low/close.
///
/// `%K = 100 * (close - lowest low) / (highest high - lowest low)` over
/// `period` points. When the range is zero `%K` is undefined. `%D` is the
/// simple mean of the last `smooth_period` values of `%K` and is undefined
/// while any of them is.
#[derive(Debug)]
pub struct Stochastic {
    highest: Maximum,
    lowest: Minimum,
    period: usize,
    smooth_period: usize,
    update_count: usize,
    recent_k: VecDeque<Option<f64>>,
    last_output: StochasticResult,
}

impl Stochastic {
    /// Create new stochastic oscillator
    pub fn new(period: usize, smooth_period: usize) -> Result<Self, PipelineError> {
        if smooth_period == 0 {
            return Err(PipelineError::invalid_period("Stochastic", smooth_period));
        }
        let invalid = |_| PipelineError::invalid_period("Stochastic", period);
        let highest = Maximum::new(period).map_err(invalid)?;
        let lowest = Minimum::new(period).map_err(invalid)?;
        Ok(Self {
            highest,
            lowest,
            period,
            smooth_period,
            update_count: 0,
            recent_k: VecDeque::with_capacity(smooth_period),
            last_output: StochasticResult::default(),
        })
    }

    pub fn name(&self) -> &str {
        "Stochastic"
    }

    /// Feed one point
    pub fn update(&mut self, high: f64, low: f64, close: f64) {
        let hh = self.highest.next(high);
        let ll = self.lowest.next(low);
        self.update_count += 1;

        let k = if self.update_count >= self.period && hh != ll {
            Some(100.0 * (close - ll) / (hh - ll))
        } else {
            None
        };

        if self.recent_k.len() == self.smooth_period {
            self.recent_k.pop_front();
        }
        self.recent_k.push_back(k);

        let d = if self.recent_k.len() == self.smooth_period {
            self.recent_k
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|sum| sum / self.smooth_period as f64)
        } else {
            None
        };

        self.last_output = StochasticResult { k, d };
    }

    /// %K line
    pub fn k(&self) -> Option<f64> {
        self.last_output.k
    }

    /// %D line
    pub fn d(&self) -> Option<f64> {
        self.last_output.d
    }

    pub fn output(&self) -> StochasticResult {
        self.last_output
    }

    pub fn is_ready(&self) -> bool {
        self.last_output.d.is_some()
    }
}

/// Stochastic result structure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StochasticResult {
    pub k: Option<f64>,
    pub d: Option<f64>,
}

/// Calculate %K / %D columns from aligned high, low and close slices
pub fn calculate_stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    smooth_period: usize,
) -> Result<Vec<StochasticResult>, PipelineError> {
    let mut stoch = Stochastic::new(period, smooth_period)?;
    Ok(highs
        .iter()
        .zip(lows)
        .zip(closes)
        .map(|((&high, &low), &close)| {
            stoch.update(high, low, close);
            stoch.output()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_and_d_definitions() {
        let highs = [10.0, 12.0, 11.0, 13.0, 14.0];
        let lows = [8.0, 9.0, 9.0, 10.0, 11.0];
        let closes = [9.0, 11.0, 10.0, 12.0, 13.0];
        let out = calculate_stochastic(&highs, &lows, &closes, 3, 2).unwrap();

        assert_eq!(out[0].k, None);
        assert_eq!(out[1].k, None);
        // window [0..=2]: HH 12, LL 8 -> (10 - 8) / 4
        assert_eq!(out[2].k, Some(50.0));
        assert_eq!(out[2].d, None);
        // window [1..=3]: HH 13, LL 9 -> (12 - 9) / 4
        assert_eq!(out[3].k, Some(75.0));
        assert_eq!(out[3].d, Some(62.5));
    }

    #[test]
    fn test_flat_range_is_undefined() {
        let flat = [5.0; 6];
        let out = calculate_stochastic(&flat, &flat, &flat, 3, 2).unwrap();

        assert!(out.iter().all(|o| o.k.is_none() && o.d.is_none()));
    }
}
