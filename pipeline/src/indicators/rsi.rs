//! RSI (Relative Strength Index) indicator, Wilder's smoothing

use crate::error::PipelineError;
use crate::indicators::Indicator;

/// RSI indicator.
///
/// Average gain/loss are seeded with the simple mean of the first `period`
/// price changes and then smoothed as `avg = (avg * (period - 1) + x) / period`.
/// The first value is therefore available after `period + 1` closes.
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    prev_close: Option<f64>,
    changes_seen: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Result<Self, PipelineError> {
        if period == 0 {
            return Err(PipelineError::invalid_period("RSI", period));
        }
        Ok(Self {
            period,
            prev_close: None,
            changes_seen: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            last_value: None,
        })
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        let Some(prev) = self.prev_close.replace(value) else {
            return;
        };

        let delta = value - prev;
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        let period = self.period as f64;
        self.changes_seen += 1;

        if self.changes_seen < self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            return;
        }

        if self.changes_seen == self.period {
            self.avg_gain = (self.gain_sum + gain) / period;
            self.avg_loss = (self.loss_sum + loss) / period;
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }

        self.last_value = Some(rsi_from_averages(self.avg_gain, self.avg_loss));
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        // needs period+1 values
        self.last_value.is_some()
    }
}

/// Flat prices read as neutral 50; gains with no losses read as 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, PipelineError> {
    let mut rsi = RSI::new(period)?;
    Ok(values
        .iter()
        .map(|&value| {
            rsi.update(value);
            rsi.value()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_not_ready_before_period_plus_one() {
        let mut rsi = RSI::new(14).unwrap();
        let values = vec![100.0, 102.0, 101.0, 103.0, 105.0, 104.0, 106.0];

        for value in values {
            rsi.update(value);
        }

        assert!(!rsi.is_ready());
    }

    #[test]
    fn test_rsi_first_value_at_period_index() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i)).collect();
        let rsi = calculate_rsi(&closes, 14).unwrap();

        assert!(rsi[..14].iter().all(Option::is_none));
        assert_eq!(rsi[14], Some(100.0));
    }

    #[test]
    fn test_rsi_wilder_values() {
        // Alternating +2 / -1 moves: seed averages over 4 changes are 1.0 / 0.5.
        let closes = [10.0, 12.0, 11.0, 13.0, 12.0, 14.0];
        let rsi = calculate_rsi(&closes, 4).unwrap();

        let first = rsi[4].unwrap();
        assert!((first - (100.0 - 100.0 / 3.0)).abs() < 1e-9);

        // avg_gain = (1.0 * 3 + 2) / 4 = 1.25, avg_loss = (0.5 * 3) / 4 = 0.375
        let second = rsi[5].unwrap();
        let rs = 1.25 / 0.375;
        assert!((second - (100.0 - 100.0 / (1.0 + rs))).abs() < 1e-9);
    }

    #[test]
    fn test_flat_prices_are_neutral() {
        let rsi = calculate_rsi(&[5.0; 6], 3).unwrap();
        assert_eq!(rsi[3], Some(50.0));
    }
}
